//! Input subsystem - buttons in, report changes out.
//!
//! Button tasks publish `InputEvent`s on a channel; the input task
//! applies them to the shared report one at a time and, for button
//! events on a suspended bus, asks the USB task to wake the host.

pub mod buttons;
pub mod event;
pub mod mapping;

use crate::config::{INPUT_EVENT_QUEUE_LEN, USB_REMOTE_WAKEUP};
use crate::state;
use crate::usb::hid_device;
use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use event::InputEvent;
use mapping::{should_request_wakeup, Outcome};

/// Drain the input channel forever.
pub async fn input_task(
    rx: Receiver<'static, CriticalSectionRawMutex, InputEvent, INPUT_EVENT_QUEUE_LEN>,
) -> ! {
    info!("Input task started");

    loop {
        let event = rx.receive().await;

        let outcome = state::apply(event);
        if outcome == Outcome::Unrecognized {
            info!(
                "Unrecognized input code {} value {}",
                event.code, event.value
            );
            continue;
        }

        if should_request_wakeup(outcome, USB_REMOTE_WAKEUP, hid_device::is_suspended()) {
            hid_device::request_remote_wakeup();
        }
    }
}
