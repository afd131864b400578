// LED blink task - walks the strip through the green/dark cycle
use defmt::{error, info};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Output;
use esp_hal_smartled::smart_led_buffer;

use esp_core::{BlinkTimings, Blinker};

use crate::config::{
    BLINK_OFF_MS, BLINK_ON_MS, LED_BRIGHTNESS, LED_COUNT, RMT_CLOCK_MHZ, STRIP_COLOR_ORDER,
};
use crate::hal::{OnboardStatusLed, RmtStripWriter};

/// LED blink task
///
/// Owns both light outputs for the whole process lifetime: the 7-LED
/// strip behind the RMT peripheral and the onboard status LED. The cycle
/// itself lives in `esp_core::Blinker` (host-testable); this task only
/// does the hardware bring-up and the waiting.
///
/// A failed strip transfer is logged and the cycle keeps running; the
/// strip is fire-and-forget.
///
/// # Parameters
/// - `data_pin`: GPIO peripheral for the strip data line
/// - `rmt_peripheral`: RMT peripheral for the bit timing
/// - `status_pin`: push-pull output of the onboard status LED
#[embassy_executor::task]
pub async fn blink_task(
    data_pin: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    status_pin: Output<'static>,
) {
    // Pulse buffer for the strip data (7 LEDs)
    // The macro allocates memory in the format the RMT expects
    let mut rmt_buffer = smart_led_buffer!(7);

    // Hardware init: RmtStripWriter wraps RMT + SmartLED adapter
    let mut strip = RmtStripWriter::new(
        data_pin,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        &mut rmt_buffer,
        LED_BRIGHTNESS,
        STRIP_COLOR_ORDER,
    );
    let mut status = OnboardStatusLed::new(status_pin);

    let mut blinker: Blinker<LED_COUNT> =
        Blinker::new(BlinkTimings::new(BLINK_ON_MS, BLINK_OFF_MS));

    info!(
        "Blink: {} LEDs, brightness {}, cycle {}ms/{}ms",
        LED_COUNT, LED_BRIGHTNESS, BLINK_ON_MS, BLINK_OFF_MS
    );

    loop {
        let dwell = match blinker.tick(&mut strip, &mut status) {
            Ok(dwell) => dwell,
            Err(e) => {
                error!("Blink: strip write failed: {}", e);
                BLINK_OFF_MS
            }
        };

        // Async delay: hands the CPU to the other tasks
        Timer::after(Duration::from_millis(dwell)).await;
    }
}
