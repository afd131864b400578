// Library root: reusable logic and modules
// No standard library (embedded system)
#![no_std]

// Modules
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports from esp-core
pub use esp_core::{
    BlinkPhase, BlinkTimings, Blinker, ColorOrder, FrameDecoder, FrameError, FrameKind, LedError,
    MAX_PAYLOAD_LEN, StatusLed, StripWriter,
};

// Embassy channel types
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

// ============================================================================
// Serial link plumbing
// ============================================================================

/// One decoded data payload, owned while it crosses the reply channel
pub type LinkFrame = heapless::Vec<u8, MAX_PAYLOAD_LEN>;

/// Reply queued from the rx task toward the tx task
pub enum LinkReply {
    /// Echo the received payload back to the host
    Echo(LinkFrame),
    /// Send a human-readable notice frame
    Notice(&'static str),
}

// Type aliases for the channel types
//
// These aliases keep the task signatures readable.
// Instead of:  Sender<'static, NoopRawMutex, LinkReply, 1>
// use:         LinkReplySender

/// Channel for link replies (rx task -> tx task)
/// - 1: message capacity (one reply in flight at a time, the host
///   waits for each reply before sending the next frame)
pub type LinkReplyChannel = Channel<NoopRawMutex, LinkReply, 1>;

/// Sender for link replies (rx task side)
pub type LinkReplySender = Sender<'static, NoopRawMutex, LinkReply, 1>;

/// Receiver for link replies (tx task side)
pub type LinkReplyReceiver = Receiver<'static, NoopRawMutex, LinkReply, 1>;
