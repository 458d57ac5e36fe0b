// fixtures.rs — commonly used request/reply packets

use usbcontrol::protocol::Packet;
use usbcontrol::test_support::reply;

/// A request as typed into a device console: command 0x20, two arguments.
pub fn sample_request() -> Packet {
    let bytes = hex::decode("2003e8").unwrap();
    Packet::from_slice(&bytes).unwrap()
}

pub fn ok_reply() -> Vec<u8> {
    reply(usbcontrol::constants::DEFAULT_RESPONSE_CODE, 0x00)
}

pub fn error_reply(code: u8) -> Vec<u8> {
    reply(code, 0xff)
}
