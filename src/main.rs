//! hid-mouse firmware entry point.
//!
//! Wires four buttons to a USB HID mouse on the nRF52840-DK:
//!
//! ```text
//! buttons ──► input channel ──► input task ──► shared report
//!                                                   │
//!                USB task ◄── remote wakeup         ▼
//!                                             report writer ──► 3 × HID IN + LED
//! ```

#![no_std]
#![no_main]

mod config;
mod error;
mod hid;
mod input;
mod state;
mod usb;

use config::INPUT_EVENT_QUEUE_LEN;
use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::config::{Config as NrfConfig, HfclkSource};
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::UsbDevice;
use input::event::{InputEvent, KEY_0, KEY_1, KEY_2, KEY_3};
use usb::hid_device::{ReportWriters, UsbDriver};
use {defmt_rtt as _, panic_probe as _};

/// Button tasks → input task.
static INPUT_EVENTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_EVENT_QUEUE_LEN> =
    Channel::new();

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn writer_task(writers: ReportWriters, led: Output<'static>) -> ! {
    usb::hid_device::report_writer_task(writers, led).await
}

#[embassy_executor::task]
async fn input_task() -> ! {
    input::input_task(INPUT_EVENTS.receiver()).await
}

#[embassy_executor::task(pool_size = 4)]
async fn button_task(pin: AnyPin, code: u16) -> ! {
    let pin = Input::new(pin, Pull::Up);
    input::buttons::watch_button(pin, code, INPUT_EVENTS.sender()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // USB needs the external crystal.
    let mut nrf_config = NrfConfig::default();
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!("hid-mouse starting");

    match hid::mouse_layout() {
        Ok(layout) => {
            info!(
                "Report descriptor: {} byte input report, mouse={}",
                layout.input_bytes(),
                layout.is_mouse
            );
            if let Err(e) = hid::check_layout(&layout) {
                error!("Report descriptor disagrees with report: {}", e);
            }
        }
        Err(e) => error!("Report descriptor does not parse: {}", e),
    }

    // LED1, active low: start off.
    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    let usb = usb::hid_device::init(p.USBD);

    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(writer_task(usb.writers, led)));
    unwrap!(spawner.spawn(input_task()));

    let buttons = [
        (p.P0_11.degrade(), KEY_0),
        (p.P0_12.degrade(), KEY_1),
        (p.P0_24.degrade(), KEY_2),
        (p.P0_25.degrade(), KEY_3),
    ];
    for (pin, code) in buttons {
        unwrap!(spawner.spawn(button_task(pin, code)));
    }

    info!("All tasks spawned");
}
