//! GPIO button input with async debouncing.
//!
//! Four physical buttons (active-low with internal pull-up), one task
//! each. A task waits for any edge, debounces it, and if the settled
//! level differs from the last reported one sends an `InputEvent` with
//! value 1 (pressed) or 0 (released).

use crate::config::{BUTTON_DEBOUNCE_MS, INPUT_EVENT_QUEUE_LEN};
use crate::input::event::InputEvent;
use defmt::{debug, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

/// Run a single button loop, reporting presses and releases as `code`.
pub async fn watch_button<P>(
    mut pin: P,
    code: u16,
    tx: Sender<'static, CriticalSectionRawMutex, InputEvent, INPUT_EVENT_QUEUE_LEN>,
) -> !
where
    P: InputPin + Wait,
{
    let mut pressed = false;

    loop {
        if pin.wait_for_any_edge().await.is_err() {
            warn!("Button {}: edge wait failed", code);
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
            continue;
        }

        // Debounce: let the contacts settle, then sample.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        let Ok(low) = pin.is_low() else {
            warn!("Button {}: level read failed", code);
            continue;
        };

        if low != pressed {
            pressed = low;
            let event = InputEvent::key(code, pressed);
            debug!("Button: {}", event);
            tx.send(event).await;
        }
    }
}
