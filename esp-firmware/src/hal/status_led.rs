// Onboard status LED
//
// Plain push-pull GPIO output, high while the strip shows its on-phase.

use esp_core::StatusLed;
use esp_hal::gpio::Output;

/// Status LED on a push-pull GPIO output (active high)
pub struct OnboardStatusLed {
    pin: Output<'static>,
}

impl OnboardStatusLed {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl StatusLed for OnboardStatusLed {
    fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
