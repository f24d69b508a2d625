//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hid-mouse";
pub const USB_PRODUCT: &str = "USB HID Mouse Sample";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Bus power draw advertised to the host (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// Allow the device to wake a suspended host when a button is pressed.
pub const USB_REMOTE_WAKEUP: bool = true;

/// USB HID polling interval (ms). 1 ms = 1000 Hz for lowest latency.
pub const USB_HID_POLL_MS: u8 = 1;

/// Interrupt IN endpoint packet size. 64 is the full-speed maximum.
pub const HID_MAX_PACKET_SIZE: u16 = 64;

/// Number of HID interfaces registered with the same mouse descriptor.
pub const HID_INTERFACE_COUNT: usize = 3;

/// Bytes written per cycle to interfaces 0 and 2. Interface 1 always
/// receives the full report.
pub const HID_SHORT_WRITE_LEN: usize = 64;

/// When `true` the writer blocks until an input event changes the report;
/// when `false` it writes every cycle and relies on the host's IN polling
/// for pacing.
pub const WAIT_FOR_REPORT_CHANGE: bool = false;

// Input

/// Amount added to X or Y for each axis key press.
pub const AXIS_STEP: i16 = 10;

/// Depth of the button → input-task event channel.
pub const INPUT_EVENT_QUEUE_LEN: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` are
// picked in `main.rs`.  Adjust for your custom PCB.
//
//   Button 1 (KEY_0, left)   → P0.11
//   Button 2 (KEY_1, right)  → P0.12
//   Button 3 (KEY_2, X+)     → P0.24
//   Button 4 (KEY_3, Y+)     → P0.25
//   LED1 (heartbeat)         → P0.13 (active low)

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 20;
