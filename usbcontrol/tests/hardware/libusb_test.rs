use serial_test::serial;
use usbcontrol::host::LibusbHost;
use usbcontrol::prelude::*;

use crate::common;

// These tests need a device attached and USBCONTROL_USB_ID set. Run
// manually with:
//
// cargo test -p usbcontrol --test hardware --features usb -- --ignored

fn usb_id() -> Option<UsbId> {
    std::env::var("USBCONTROL_USB_ID").ok()?.parse().ok()
}

#[test]
#[ignore = "requires hardware (libusb)"]
#[serial]
fn open_and_discover_endpoints() -> Result<()> {
    common::init_logging();
    let Some(id) = usb_id() else { return Ok(()) };
    if let Some(mut dev) = common::connect_if_present(LibusbHost::new()?, &id)? {
        assert!(dev.pipes().bulk_in.is_in());
        assert!(dev.pipes().bulk_out.is_out());
        dev.speed()?;
    }
    Ok(())
}

#[test]
#[ignore = "requires hardware (libusb)"]
#[serial]
fn exchange_with_device() -> Result<()> {
    common::init_logging();
    let (Some(id), Some(mut packet)) = (usb_id(), common::request_from_env()) else {
        return Ok(());
    };
    if let Some(mut dev) = common::connect_if_present(LibusbHost::new()?, &id)? {
        let out = dev.send_config(&mut packet)?;
        assert!(out.bytes_read > 0);
    }
    Ok(())
}
