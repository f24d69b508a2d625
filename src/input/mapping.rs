//! Turns input events into changes to the shared mouse report.

use crate::config::AXIS_STEP;
use crate::hid::mouse::{MouseReport, BUTTON_LEFT, BUTTON_RIGHT};
use crate::input::event::{InputEvent, KEY_0, KEY_1, KEY_2, KEY_3};

/// What a recognised key does to the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Mirror the key state onto a button bit.
    Button(u8),
    /// Add `AXIS_STEP` to X on press.
    NudgeX,
    /// Add `AXIS_STEP` to Y on press.
    NudgeY,
}

impl Action {
    /// Map a key code to its action.
    pub fn for_code(code: u16) -> Option<Self> {
        match code {
            KEY_0 => Some(Action::Button(BUTTON_LEFT)),
            KEY_1 => Some(Action::Button(BUTTON_RIGHT)),
            KEY_2 => Some(Action::NudgeX),
            KEY_3 => Some(Action::NudgeY),
            _ => None,
        }
    }

    /// Button events may wake a suspended host; axis nudges do not.
    pub fn wakes_host(&self) -> bool {
        matches!(self, Action::Button(_))
    }
}

/// Result of applying one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Code has no mapping; the report is untouched.
    Unrecognized,
    Applied {
        /// The report bytes differ from before the event.
        changed: bool,
        /// The event asks for a remote wakeup if the bus is suspended.
        wake: bool,
    },
}

impl Outcome {
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Applied { changed: true, .. })
    }

    pub fn wake(&self) -> bool {
        matches!(self, Outcome::Applied { wake: true, .. })
    }
}

/// Accumulated pointer state. Axis deltas are never reset, so every
/// report written keeps moving the pointer by the running total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    report: MouseReport,
}

impl MouseState {
    pub const fn new() -> Self {
        Self {
            report: MouseReport::empty(),
        }
    }

    /// Copy of the current report.
    pub fn report(&self) -> MouseReport {
        self.report
    }

    /// Apply one input event.
    pub fn apply(&mut self, event: InputEvent) -> Outcome {
        let Some(action) = Action::for_code(event.code) else {
            return Outcome::Unrecognized;
        };

        let before = self.report;
        match action {
            Action::Button(bit) => self.report.set_button(bit, event.is_press()),
            Action::NudgeX => {
                if event.is_press() {
                    self.report.x = self.report.x.wrapping_add(AXIS_STEP);
                }
            }
            Action::NudgeY => {
                if event.is_press() {
                    self.report.y = self.report.y.wrapping_add(AXIS_STEP);
                }
            }
        }

        Outcome::Applied {
            changed: before != self.report,
            wake: action.wakes_host(),
        }
    }
}

/// Whether the input task should ask the USB task for a remote wakeup.
pub fn should_request_wakeup(
    outcome: Outcome,
    wakeup_enabled: bool,
    bus_suspended: bool,
) -> bool {
    wakeup_enabled && bus_suspended && outcome.wake()
}
