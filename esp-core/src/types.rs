//! Core types for the blink cycle
//!
//! Data structures without hardware dependencies

use rgb::RGB8;

/// Phase of the blink cycle
///
/// The strip and the status LED are driven from the same phase:
/// during `On` the strip is green and the status LED is high,
/// during `Off` the strip is dark and the status LED is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlinkPhase {
    On,
    Off,
}

impl BlinkPhase {
    /// Full-intensity frame color for this phase
    ///
    /// Brightness is a transmit-time concern, see `StripWriter`
    /// implementations. The frame itself always holds pure green or black.
    pub const fn color(self) -> RGB8 {
        match self {
            BlinkPhase::On => RGB8 { r: 0, g: 255, b: 0 },
            BlinkPhase::Off => RGB8 { r: 0, g: 0, b: 0 },
        }
    }

    /// Level of the onboard status LED during this phase
    pub const fn status_level(self) -> bool {
        matches!(self, BlinkPhase::On)
    }

    /// The phase that follows this one
    pub const fn toggle(self) -> Self {
        match self {
            BlinkPhase::On => BlinkPhase::Off,
            BlinkPhase::Off => BlinkPhase::On,
        }
    }
}

/// Dwell times of the two blink phases in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlinkTimings {
    pub on_ms: u64,
    pub off_ms: u64,
}

impl BlinkTimings {
    pub const fn new(on_ms: u64, off_ms: u64) -> Self {
        Self { on_ms, off_ms }
    }

    /// How long the given phase is held before the next toggle
    pub const fn dwell_ms(self, phase: BlinkPhase) -> u64 {
        match phase {
            BlinkPhase::On => self.on_ms,
            BlinkPhase::Off => self.off_ms,
        }
    }
}

/// Component order expected by the LED chip on the wire
///
/// The RMT smart-LED adapter always emits the green component first
/// (WS2812 convention). For chips latching red first (WS2811 strips wired
/// RGB) the components must be swapped before they reach the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorOrder {
    /// Green first on the wire (WS2812) - adapter native, no remapping
    Grb,
    /// Red first on the wire (WS2811 in RGB wiring)
    Rgb,
}

impl ColorOrder {
    /// Remaps a logical color so the adapter's GRB emission produces this
    /// order on the wire
    pub const fn to_adapter(self, color: RGB8) -> RGB8 {
        match self {
            // Adapter sends (g, r, b); chip reads (g, r, b)
            ColorOrder::Grb => color,
            // Adapter sends (g, r, b); chip reads (r, g, b), so pre-swap
            // red and green to land each component on its channel
            ColorOrder::Rgb => RGB8 {
                r: color.g,
                g: color.r,
                b: color.b,
            },
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for BlinkPhase {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BlinkPhase::On => defmt::write!(fmt, "On"),
            BlinkPhase::Off => defmt::write!(fmt, "Off"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BlinkTimings {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "BlinkTimings {{ on: {}ms, off: {}ms }}",
            self.on_ms,
            self.off_ms
        )
    }
}
