//! Hardware Abstraction Traits
//!
//! Interfaces for hardware access without a concrete implementation.

use rgb::RGB8;

/// Error type for LED strip operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LedError::WriteFailed => defmt::write!(fmt, "Write failed"),
        }
    }
}

/// Trait for addressable LED strip access
///
/// Abstracts transmission of a whole frame to a WS2811/WS2812 strip.
///
/// # Implementations
/// - **Production:** RmtStripWriter (ESP32 RMT peripheral)
/// - **Testing:** MockStripWriter (in-memory mock)
pub trait StripWriter: Send {
    /// Transmits one frame of colors to the strip
    ///
    /// The slice covers the whole strip; element `i` addresses LED `i`.
    ///
    /// # Errors
    /// Returns `LedError::WriteFailed` when the hardware transfer fails
    fn write(&mut self, colors: &[RGB8]) -> Result<(), LedError>;
}

/// Trait for the onboard status LED
///
/// A plain push-pull output. Setting a GPIO level cannot fail,
/// so the method is infallible.
pub trait StatusLed: Send {
    /// Drives the status LED high (`true`) or low (`false`)
    fn set(&mut self, on: bool);
}
