// Hardware Abstraction Layer (HAL) module
//
// Implements the esp-core hardware traits against the ESP32-C6
// peripherals (RMT smart-LED transport, GPIO status LED).

pub mod status_led;
pub mod strip_writer;

pub use status_led::OnboardStatusLed;
pub use strip_writer::{RmtStripWriter, STRIP_BUFFER_SIZE};
