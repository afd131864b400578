// RMT strip writer
//
// Drives the WS2811 strip through the ESP32 RMT peripheral. Brightness
// and channel-order handling live here: the frame handed in by the blink
// logic always holds full-intensity logical colors.

use esp_core::{ColorOrder, LedError, StripWriter, scale_color};
use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::LED_COUNT;

/// Pulse buffer size for the whole strip (24 pulses per LED + 1 stop)
pub const STRIP_BUFFER_SIZE: usize = 24 * LED_COUNT + 1;

/// Real hardware strip writer
///
/// Uses the ESP32 RMT peripheral to clock out WS2811 frames.
///
/// Note: the pulse buffer must outlive the adapter, so it is created in
/// the task and passed in as a parameter instead of being allocated in
/// the constructor.
pub struct RmtStripWriter<'a> {
    strip: SmartLedsAdapter<'a, STRIP_BUFFER_SIZE>,
    brightness: u8,
    order: ColorOrder,
}

impl<'a> RmtStripWriter<'a> {
    /// Creates a new RmtStripWriter
    ///
    /// # Parameters
    /// - `data_pin`: GPIO peripheral carrying the strip data line
    /// - `rmt_peripheral`: RMT peripheral
    /// - `rmt_clock_mhz`: RMT clock frequency in MHz (e.g. 80)
    /// - `buffer`: pulse buffer (created with the smart_led_buffer! macro)
    /// - `brightness`: global output brightness applied to every frame
    /// - `order`: component order the strip latches on the wire
    pub fn new(
        data_pin: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; STRIP_BUFFER_SIZE],
        brightness: u8,
        order: ColorOrder,
    ) -> Self {
        // Initialize RMT
        let rmt: Rmt<'a, Blocking> =
            Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz)).unwrap();

        // Create the SmartLED adapter on channel 0
        let strip = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Self {
            strip,
            brightness,
            order,
        }
    }
}

impl<'a> StripWriter for RmtStripWriter<'a> {
    fn write(&mut self, colors: &[RGB8]) -> Result<(), LedError> {
        let brightness = self.brightness;
        let order = self.order;

        // Scale to the global brightness, then remap components so the
        // adapter's GRB emission matches the strip's wire order
        self.strip
            .write(
                colors
                    .iter()
                    .map(|&color| order.to_adapter(scale_color(color, brightness))),
            )
            .map_err(|_| LedError::WriteFailed)
    }
}
