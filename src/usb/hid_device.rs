//! USB HID composite device - three mouse interfaces.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral, services suspend/resume and remote wakeup, and pushes
//! the shared report to every HID endpoint.

use crate::config;
use crate::error::Error;
use crate::hid::mouse::{MouseReport, MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};
use crate::state;
use core::sync::atomic::{AtomicBool, Ordering};
use defmt::{debug, error, info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config, UsbDevice};
use embedded_hal::digital::StatefulOutputPin;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// Concrete USB driver for the nRF52840.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Writer for interfaces that take the short report prefix.
pub type ShortWriter = HidWriter<'static, UsbDriver, { config::HID_SHORT_WRITE_LEN }>;

/// Writer for the interface that takes the whole report.
pub type FullWriter = HidWriter<'static, UsbDriver, MOUSE_REPORT_SIZE>;

static HID0_STATE: StaticCell<State> = StaticCell::new();
static HID1_STATE: StaticCell<State> = StaticCell::new();
static HID2_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static USB_STATUS_HANDLER: StaticCell<UsbStatusHandler> = StaticCell::new();
static REPORT_BUF: StaticCell<[u8; MOUSE_REPORT_SIZE]> = StaticCell::new();

static USB_SUSPENDED: AtomicBool = AtomicBool::new(false);
static REMOTE_WAKEUP: Signal<CriticalSectionRawMutex, ()> = Signal::new();

struct UsbStatusHandler;

impl embassy_usb::Handler for UsbStatusHandler {
    fn enabled(&mut self, enabled: bool) {
        info!("USB enabled={}", enabled);
        if !enabled {
            USB_SUSPENDED.store(false, Ordering::Release);
        }
    }

    fn reset(&mut self) {
        debug!("USB bus reset");
        USB_SUSPENDED.store(false, Ordering::Release);
    }

    fn configured(&mut self, configured: bool) {
        info!("USB configured={}", configured);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB suspended={}", suspended);
        USB_SUSPENDED.store(suspended, Ordering::Release);
    }
}

/// Whether the host has suspended the bus.
pub fn is_suspended() -> bool {
    USB_SUSPENDED.load(Ordering::Acquire)
}

/// Ask the USB task to signal remote wakeup to the host.
pub fn request_remote_wakeup() {
    REMOTE_WAKEUP.signal(());
}

/// The three HID endpoints, in registration order, plus the buffer the
/// report is serialized into.
pub struct ReportWriters {
    pub first: ShortWriter,
    pub full: FullWriter,
    pub last: ShortWriter,
    buf: &'static mut [u8; MOUSE_REPORT_SIZE],
}

impl ReportWriters {
    /// Wait until the host has configured every interface.
    async fn ready(&mut self) {
        self.first.ready().await;
        self.full.ready().await;
        self.last.ready().await;
    }

    /// Serialize `report` and write it to all interfaces. Every write is
    /// attempted; each result is returned.
    async fn write_all(&mut self, report: MouseReport) -> [Result<(), Error>; 3] {
        report.serialize(&mut self.buf[..]);
        let full = &self.buf[..];
        let short = &full[..config::HID_SHORT_WRITE_LEN];
        [
            write_result(0, self.first.write(short).await),
            write_result(1, self.full.write(full).await),
            write_result(2, self.last.write(short).await),
        ]
    }
}

fn write_result(interface: u8, result: Result<(), EndpointError>) -> Result<(), Error> {
    result.map_err(|e| Error::UsbWrite {
        interface,
        cause: e.into(),
    })
}

/// Build result containing the USB device runner and the HID writers.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writers: ReportWriters,
}

fn hid_config() -> HidConfig<'static> {
    HidConfig {
        report_descriptor: MOUSE_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: config::HID_MAX_PACKET_SIZE,
    }
}

/// Initialise the USB stack and create the composite HID device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = config::USB_REMOTE_WAKEUP;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let status_handler = USB_STATUS_HANDLER.init(UsbStatusHandler);
    builder.handler(status_handler);

    let first = HidWriter::new(&mut builder, HID0_STATE.init(State::new()), hid_config());
    let full = HidWriter::new(&mut builder, HID1_STATE.init(State::new()), hid_config());
    let last = HidWriter::new(&mut builder, HID2_STATE.init(State::new()), hid_config());

    let device = builder.build();

    info!(
        "USB HID device initialised ({} mouse interfaces, {} byte report)",
        config::HID_INTERFACE_COUNT,
        MOUSE_REPORT_SIZE
    );

    UsbHidDevice {
        device,
        writers: ReportWriters {
            first,
            full,
            last,
            buf: REPORT_BUF.init([0u8; MOUSE_REPORT_SIZE]),
        },
    }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// Handles enumeration and endpoint servicing. While the bus is
/// suspended it waits for either a host resume or a remote wakeup
/// request from the input task.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");

    loop {
        device.run_until_suspend().await;

        match select(device.wait_resume(), REMOTE_WAKEUP.wait()).await {
            Either::First(()) => {
                debug!("USB resumed by host");
                REMOTE_WAKEUP.reset();
            }
            Either::Second(()) => {
                info!("Signalling remote wakeup");
                if device.remote_wakeup().await.is_err() {
                    warn!("{}", Error::RemoteWakeup);
                }
            }
        }
    }
}

/// Report writer - pushes the shared report to every HID endpoint in
/// a loop and toggles the heartbeat LED after each round.
///
/// Write and LED errors are logged and the loop carries on.
pub async fn report_writer_task<L: StatefulOutputPin>(
    mut writers: ReportWriters,
    mut led: L,
) -> ! {
    info!("Report writer task started");

    let mut idle = true;
    loop {
        // Disabled endpoints fail without awaiting.
        writers.ready().await;

        if config::WAIT_FOR_REPORT_CHANGE {
            state::wait_for_change().await;
        }

        let report = state::snapshot();
        if report.is_idle() != idle {
            idle = report.is_idle();
            debug!("Report {}: {}", if idle { "idle" } else { "active" }, report);
        }

        for result in writers.write_all(report).await {
            if let Err(e) = result {
                error!("HID write error: {}", e);
            }
        }

        // Toggle LED on sent report
        if led.toggle().is_err() {
            error!("{}", Error::Led);
        }
    }
}
