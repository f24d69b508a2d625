//! Shared mouse report, written by the input task and read by the writer.
//!
//! The report sits behind a critical-section mutex; both sides hold the
//! lock only long enough to apply one event or copy the report out.

use crate::hid::mouse::MouseReport;
use crate::input::event::InputEvent;
use crate::input::mapping::{MouseState, Outcome};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

static MOUSE_STATE: Mutex<CriticalSectionRawMutex, RefCell<MouseState>> =
    Mutex::new(RefCell::new(MouseState::new()));

static REPORT_CHANGED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Apply an input event to the shared report, waking the writer if the
/// report bytes changed.
pub fn apply(event: InputEvent) -> Outcome {
    let outcome = MOUSE_STATE.lock(|state| state.borrow_mut().apply(event));
    if outcome.changed() {
        REPORT_CHANGED.signal(());
    }
    outcome
}

/// Copy of the current report.
pub fn snapshot() -> MouseReport {
    MOUSE_STATE.lock(|state| state.borrow().report())
}

/// Wait until an input event changes the report.
pub async fn wait_for_change() {
    REPORT_CHANGED.wait().await
}
