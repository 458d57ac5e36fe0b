//! Send one 64-byte request to a WinUSB device and print the reply.
//!
//! Usage:
//!   cargo run -p usbcontrol --example send_config --features winusb -- <GUID> <REQUEST_HEX>
//!
//! Set RUST_LOG=debug to see enumeration and pipe discovery.

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use usbcontrol::host::WinUsbHost;
    use usbcontrol::prelude::*;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let guid: InterfaceGuid = args
        .next()
        .context("missing interface GUID argument")?
        .parse()?;
    let request = parse_hex(&args.next().unwrap_or_default()).map_err(anyhow::Error::msg)?;

    let mut dev = DeviceBuilder::new()
        .with_host(WinUsbHost::new())
        .selection(SelectionPolicy::Unique)
        .connect(&guid)?;
    println!("opened {}", dev.path());
    println!("speed: {}", dev.speed()?);
    println!(
        "bulk in {} bulk out {}",
        dev.pipes().bulk_in,
        dev.pipes().bulk_out
    );

    let mut packet = Packet::from_slice(&request)?;
    match dev.send_config(&mut packet) {
        Ok(out) => println!(
            "reply ({} bytes): {}",
            out.bytes_read,
            bytes_to_hex_spaced(&packet.as_bytes()[..out.bytes_read])
        ),
        Err(Error::UnexpectedResponse { actual, .. }) => {
            println!("device rejected the request with code {:#04x}", actual);
            println!("reply: {}", packet.to_hex());
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(not(windows))]
fn main() {
    eprintln!("send_config uses WinUSB and only runs on Windows; see probe_libusb");
}
