//! USB Device subsystem - presents the mouse to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We create a composite device with three HID
//! interfaces, all advertising the same mouse report descriptor:
//!
//! - Interface 0: receives the first 64 bytes of each report
//! - Interface 1: receives the full 3072-byte report
//! - Interface 2: receives the first 64 bytes of each report
//!
//! The writer task copies the shared report every cycle, writes it to
//! all three interrupt IN endpoints and toggles the heartbeat LED.

pub mod hid_device;
