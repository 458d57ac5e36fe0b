#![cfg(feature = "usb")]

//! Open a device through libusb, list its bulk pipes and optionally run
//! one exchange.
//!
//! Usage:
//!   cargo run -p usbcontrol --example probe_libusb --features usb -- <VID:PID> [REQUEST_HEX]

use usbcontrol::host::LibusbHost;
use usbcontrol::prelude::*;
use usbcontrol::utils::hex_preview;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(id) = args.next().and_then(|s| s.parse::<UsbId>().ok()) else {
        eprintln!("usage: probe_libusb <VID:PID> [REQUEST_HEX]");
        return Ok(());
    };

    let config = LinkConfig {
        selection: SelectionPolicy::First,
        ..LinkConfig::default()
    };
    let mut dev = match Device::connect(LibusbHost::new()?, &id, config) {
        Ok(dev) => dev,
        Err(Error::DeviceNotFound) => {
            println!("no device {} attached", id);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let iface = *dev.interface();
    println!(
        "{}: interface {} alt {} class {:#04x}, {} endpoints",
        dev.path(),
        iface.interface_number,
        iface.alternate_setting,
        iface.class,
        iface.num_endpoints
    );
    for index in 0..iface.num_endpoints {
        match dev.session().pipe_info(iface.alternate_setting, index) {
            Ok(pipe) => println!(
                "  [{}] {} {} max packet {} interval {}",
                index, pipe.pipe_type, pipe.pipe_id, pipe.max_packet_size, pipe.interval
            ),
            Err(e) => println!("  [{}] query failed: {}", index, e),
        }
    }
    println!("speed: {}", dev.speed()?);

    if let Some(hex) = args.next() {
        let bytes = match parse_hex(&hex) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("bad request hex: {}", e);
                return Ok(());
            }
        };
        let mut packet = Packet::from_slice(&bytes)?;
        let out = dev.send_config(&mut packet)?;
        println!(
            "reply code {:#04x}: {}",
            out.response_code,
            hex_preview(packet.as_bytes(), 64)
        );
    }
    Ok(())
}
