//! ESP Core - Platform-agnostic Logic and Traits
//!
//! This crate has NO hardware dependencies. It holds the blink cycle
//! logic, the serial frame codec and the traits the firmware implements.

#![no_std]

pub mod frame;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports for convenient access
pub use frame::{
    END_MARKER, FrameDecoder, FrameError, FrameKind, MAX_PAYLOAD_LEN, SPECIAL_BYTE, START_MARKER,
    encode_frame, encode_notice,
};
pub use logic::{Blinker, fill_solid, scale_color};
pub use traits::{LedError, StatusLed, StripWriter};
pub use types::{BlinkPhase, BlinkTimings, ColorOrder};
