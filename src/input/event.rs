//! Discrete input events, coded the way the Linux input subsystem codes keys.

/// Key codes of the four sample buttons.
pub const KEY_0: u16 = 11;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;

/// One input notification: which key, and its new value (1 = pressed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub code: u16,
    pub value: i32,
}

impl InputEvent {
    pub const fn new(code: u16, value: i32) -> Self {
        Self { code, value }
    }

    /// Key press (`pressed = true`) or release event.
    pub const fn key(code: u16, pressed: bool) -> Self {
        Self::new(code, pressed as i32)
    }

    pub fn is_press(&self) -> bool {
        self.value != 0
    }
}
