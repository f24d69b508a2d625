//! Unified error type for hid-mouse.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use defmt::Format;
use embassy_usb::driver::EndpointError;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, Format)]
pub enum Error {
    // USB
    /// Writing a report to one HID interface failed.
    UsbWrite {
        /// Index of the HID interface, in registration order.
        interface: u8,
        cause: EndpointFailure,
    },

    /// The bus could not be woken (not suspended, or host disabled it).
    RemoteWakeup,

    // GPIO
    /// Toggling the heartbeat LED failed.
    Led,
}

/// Endpoint-level failure, mirroring the USB driver's error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum EndpointFailure {
    /// Report longer than the endpoint accepts.
    BufferOverflow,
    /// Endpoint not enabled (cable out, or host has not configured us).
    Disabled,
}

// Convenience conversions

impl From<EndpointError> for EndpointFailure {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::BufferOverflow => EndpointFailure::BufferOverflow,
            EndpointError::Disabled => EndpointFailure::Disabled,
        }
    }
}
