// Project configuration: constants and hardware assignments
#![allow(dead_code)]

use esp_core::ColorOrder;

// ============================================================================
// LED strip configuration
// ============================================================================

/// GPIO pin carrying the strip data line
pub const STRIP_GPIO_PIN: u8 = 8;

/// Number of LEDs on the strip
pub const LED_COUNT: usize = 7;

/// Global output brightness (0-255), applied before transmission
pub const LED_BRIGHTNESS: u8 = 32;

/// Component order the strip latches on the wire
/// The attached chips are WS2811 wired red-first
pub const STRIP_COLOR_ORDER: ColorOrder = ColorOrder::Rgb;

/// RMT clock frequency in MHz
/// 80 MHz matches the WS2811/WS2812 bit timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Blink timing
// ============================================================================

/// Dwell time of the green phase in milliseconds
pub const BLINK_ON_MS: u64 = 700;

/// Dwell time of the dark phase in milliseconds
pub const BLINK_OFF_MS: u64 = 300;

// ============================================================================
// Status LED
// ============================================================================

/// GPIO pin of the onboard status LED (push-pull, active high)
pub const STATUS_LED_GPIO_PIN: u8 = 4;

// ============================================================================
// Serial link configuration
// ============================================================================

/// Baud rate of the UART link; the host tooling opens the port at this rate
pub const LINK_BAUD_RATE: u32 = 57_600;

/// Chunk size for UART reads
/// One read never blocks for a full chunk; the driver returns what arrived
pub const LINK_READ_CHUNK: usize = 256;

/// Text of the boot banner notice; the host waits for it before sending
pub const LINK_READY_NOTICE: &str = "Link ready";

/// Notice text sent when a frame announces more than the link accepts
pub const LINK_OVERSIZE_NOTICE: &str = "Num. of data bytes exceeds buffer size";
