//! USB HID mouse report and its report descriptor.
//!
//! Layout (3072 bytes, no report ID):
//! ```text
//! Byte 0-1:    Button bitfield, little-endian
//!              Bit 0 = Left, Bit 1 = Right, ... Bit 15 = Button 16
//! Byte 2-3:    X displacement (signed 16-bit, little-endian)
//! Byte 4-5:    Y displacement (signed 16-bit, little-endian)
//! Byte 6:      Scroll wheel (signed, -127..127)
//! Byte 7:      AC Pan (signed)
//! Byte 8-12:   Vendor page 0xFF00 block, always zero
//! Byte 13-:    Vendor page 0xFF01 data, always zero
//! ```

/// Full input report size in bytes, as declared by the descriptor.
pub const MOUSE_REPORT_SIZE: usize = 3072;

/// Bytes carrying pointer state; everything after is vendor filler.
pub const MOUSE_HEADER_SIZE: usize = 8;

/// Number of buttons declared by the descriptor.
pub const MOUSE_BUTTON_COUNT: u8 = 16;

/// Button bit for the left button.
pub const BUTTON_LEFT: u8 = 0;
/// Button bit for the right button.
pub const BUTTON_RIGHT: u8 = 1;

/// Pointer state carried in the first bytes of every report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right).
    pub buttons: u16,
    /// Relative X movement.
    pub x: i16,
    /// Relative Y movement.
    pub y: i16,
    /// Scroll wheel delta.
    pub wheel: i8,
    /// Horizontal pan delta.
    pub pan: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
            pan: 0,
        }
    }

    /// Whether button `bit` is currently pressed.
    #[cfg(test)]
    pub fn button(&self, bit: u8) -> bool {
        bit < MOUSE_BUTTON_COUNT && self.buttons & (1 << bit) != 0
    }

    /// Set or clear button `bit`. Bits past the declared button count are ignored.
    pub fn set_button(&mut self, bit: u8, pressed: bool) {
        if bit >= MOUSE_BUTTON_COUNT {
            return;
        }
        if pressed {
            self.buttons |= 1 << bit;
        } else {
            self.buttons &= !(1 << bit);
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    ///
    /// Writes the pointer header and zero-fills the vendor area up to
    /// `MOUSE_REPORT_SIZE` or the end of `buf`, whichever comes first.
    /// Returns the number of bytes written, or 0 when `buf` cannot hold
    /// the header.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_HEADER_SIZE {
            return 0;
        }
        let len = buf.len().min(MOUSE_REPORT_SIZE);
        buf[0..2].copy_from_slice(&self.buttons.to_le_bytes());
        buf[2..4].copy_from_slice(&self.x.to_le_bytes());
        buf[4..6].copy_from_slice(&self.y.to_le_bytes());
        buf[6] = self.wheel as u8;
        buf[7] = self.pan as u8;
        buf[MOUSE_HEADER_SIZE..len].fill(0);
        len
    }

    /// Parse the pointer header back out of a serialized report.
    #[cfg(test)]
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < MOUSE_HEADER_SIZE {
            return None;
        }
        Some(Self {
            buttons: u16::from_le_bytes([data[0], data[1]]),
            x: i16::from_le_bytes([data[2], data[3]]),
            y: i16::from_le_bytes([data[4], data[5]]),
            wheel: data[6] as i8,
            pan: data[7] as i8,
        })
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0 && self.pan == 0
    }
}

// USB HID report descriptor

/// Report descriptor for a 16-button mouse with 16-bit X/Y, wheel and
/// AC Pan, padded with vendor-defined fields to a 3072-byte input report.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (16 x 1 bit) -
    0x95, 0x10, //     Report Count (16)
    0x75, 0x01, //     Report Size (1)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x10, //     Usage Maximum (Button 16)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    //   - X, Y displacement (16 bit) -
    0x95, 0x02, //     Report Count (2)
    0x75, 0x10, //     Report Size (16)
    0x16, 0x01, 0x80, //     Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, //     Logical Maximum (32767)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Scroll wheel -
    0x95, 0x01, //     Report Count (1)
    0x75, 0x08, //     Report Size (8)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x09, 0x38, //     Usage (Wheel)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - AC Pan -
    0x95, 0x01, //     Report Count (1)
    0x05, 0x0C, //     Usage Page (Consumer)
    0x0A, 0x38, 0x02, //     Usage (AC Pan)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    0xC0, //   End Collection (Physical)
    //
    //   - Vendor block, 5 bytes -
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined 0xFF00)
    0x09, 0xF1, //   Usage (0xF1)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x05, //   Report Count (5)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0xFF, //   Logical Maximum (255)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    //
    //   - Vendor data fields (page 0xFF01), 3059 bytes total -
    0x06, 0x01, 0xFF, 0x09, 0x02, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x03, 0x95, 0xF4, 0x81, 0x02, // 244
    0x06, 0x01, 0xFF, 0x09, 0x04, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x04, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x04, 0x95, 0x02, 0x81, 0x02, // 2
    0x06, 0x01, 0xFF, 0x09, 0x05, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x06, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x07, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x08, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x05, 0x95, 0x04, 0x81, 0x02, // 4
    0x06, 0x01, 0xFF, 0x09, 0x05, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x06, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x07, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x08, 0x95, 0xFF, 0x81, 0x02, // 255
    0x06, 0x01, 0xFF, 0x09, 0x05, 0x95, 0x04, 0x81, 0x02, // 4
    0xC0, // End Collection (Application)
];
