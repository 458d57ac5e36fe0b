//! Shared helpers for tests that talk to a real device.
//!
//! The target device and request come from the environment so the same
//! tests work against any firmware speaking the 64-byte exchange:
//!
//! - `USBCONTROL_GUID`: device interface GUID (WinUSB)
//! - `USBCONTROL_USB_ID`: `vvvv:pppp` (libusb)
//! - `USBCONTROL_REQUEST`: request bytes in hex, zero-padded to 64
#![allow(dead_code)]

use usbcontrol::prelude::*;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Request packet from `USBCONTROL_REQUEST`, or `None` when unset.
pub fn request_from_env() -> Option<Packet> {
    let hex = std::env::var("USBCONTROL_REQUEST").ok()?;
    let bytes = parse_hex(&hex).ok()?;
    Packet::from_slice(&bytes).ok()
}

/// Connect through `host`, returning `Ok(None)` when no device is attached
/// so CI machines pass.
pub fn connect_if_present<H: UsbHost>(
    host: H,
    id: &H::InterfaceId,
) -> Result<Option<Device<H, Ready<H>>>> {
    match Device::connect(host, id, LinkConfig::default()) {
        Ok(dev) => Ok(Some(dev)),
        Err(Error::DeviceNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
