// No standard library (embedded system)
#![no_std]
// No regular main() entry point (provided by esp_rtos)
#![no_main]
// Forbid mem::forget - dangerous with ESP HAL types holding DMA buffers
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Forbid large stack frames (stack is limited on embedded systems)
#![deny(clippy::large_stack_frames)]

// Embassy async runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};

// Backtrace on panic and println!() support
use {esp_backtrace as _, esp_println as _};

// Project modules and configuration
use esp_led_blink::LinkReplyChannel;
use esp_led_blink::config::LINK_BAUD_RATE;
use esp_led_blink::tasks::{blink_task, link_rx_task, link_tx_task};

// ESP-IDF app descriptor - required by the bootloader!
// Without it flashing fails with "ESP-IDF App Descriptor missing"
esp_bootloader_esp_idf::esp_app_desc!();

/// Main entry point
///
/// Initializes the hardware, starts the embassy runtime and spawns the
/// tasks. Afterwards main() sleeps - all work happens in tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 config: CPU at maximum clock frequency (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy runtime init (timer + software interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Status LED: plain push-pull output, starts low (off-phase level)
    let status_pin = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());

    // Spawn the blink task (owns the strip and the status LED)
    spawner
        .spawn(blink_task(peripherals.GPIO8, peripherals.RMT, status_pin))
        .unwrap();

    // Link UART on GPIO16/17
    // defmt logs ride USB-Serial-JTAG, so this UART stays free for the
    // framed link toward the host tooling
    let uart = Uart::new(
        peripherals.UART0,
        UartConfig::default().with_baudrate(LINK_BAUD_RATE),
    )
    .expect("Failed to initialize link UART")
    .with_tx(peripherals.GPIO16)
    .with_rx(peripherals.GPIO17)
    .into_async();
    let (link_rx, link_tx) = uart.split();

    // Reply channel (link rx task -> link tx task)
    static REPLY_CHANNEL: static_cell::StaticCell<LinkReplyChannel> =
        static_cell::StaticCell::new();
    let reply_channel = REPLY_CHANNEL.init(LinkReplyChannel::new());

    // Spawn the link tasks on the two UART halves
    spawner
        .spawn(link_rx_task(link_rx, reply_channel.sender()))
        .unwrap();
    spawner
        .spawn(link_tx_task(link_tx, reply_channel.receiver()))
        .unwrap();

    // Main loop: sleeps (all work happens in tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
