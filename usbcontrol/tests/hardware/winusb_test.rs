use serial_test::serial;
use usbcontrol::host::WinUsbHost;
use usbcontrol::prelude::*;

use crate::common;

// These tests need a WinUSB device attached and USBCONTROL_GUID set. Run
// manually with:
//
// cargo test -p usbcontrol --test hardware --features winusb -- --ignored

fn guid() -> Option<InterfaceGuid> {
    std::env::var("USBCONTROL_GUID").ok()?.parse().ok()
}

#[test]
#[ignore = "requires hardware (WinUSB)"]
#[serial]
fn open_and_discover_endpoints() -> Result<()> {
    common::init_logging();
    let Some(guid) = guid() else { return Ok(()) };
    if let Some(mut dev) = common::connect_if_present(WinUsbHost::new(), &guid)? {
        assert!(dev.pipes().bulk_in.is_in());
        assert!(dev.pipes().bulk_out.is_out());
        dev.speed()?;
    }
    Ok(())
}

#[test]
#[ignore = "requires hardware (WinUSB)"]
#[serial]
fn exchange_with_device() -> Result<()> {
    common::init_logging();
    let (Some(guid), Some(mut packet)) = (guid(), common::request_from_env()) else {
        return Ok(());
    };
    if let Some(mut dev) = common::connect_if_present(WinUsbHost::new(), &guid)? {
        let out = dev.send_config(&mut packet)?;
        assert!(out.bytes_read > 0);
    }
    Ok(())
}
