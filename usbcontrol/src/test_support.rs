//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockHost setup so tests across the crate
//! and the tests/ directory build devices the same way.
#![allow(dead_code)]

use crate::device::{Device, LinkConfig, Ready};
use crate::host::mock::MockHost;
use crate::types::{InterfaceGuid, PipeInfo, PipeType};
use crate::Result;

/// Interface GUID used throughout the tests.
#[doc(hidden)]
pub const TEST_GUID: InterfaceGuid = InterfaceGuid::from_u128(0x58D07210_27C1_11DD_BD0B_0800200C9A66);

/// Path of the single device `mock_host` enumerates.
#[doc(hidden)]
pub const TEST_PATH: &str = "\\\\?\\usb#vid_0483&pid_5740#0001#{58d07210-27c1-11dd-bd0b-0800200c9a66}";

/// A MockHost with one device exposing an interrupt pipe and a bulk
/// in/out pair (0x81 / 0x01).
#[doc(hidden)]
pub fn mock_host() -> MockHost {
    let mut host = MockHost::new();
    host.add_device(TEST_PATH);
    host.set_pipes(vec![
        PipeInfo::new(PipeType::Interrupt, 0x83, 8),
        PipeInfo::bulk(0x81),
        PipeInfo::bulk(0x01),
    ]);
    host
}

/// A full 64-byte reply starting with `code`, payload bytes set to `fill`.
#[doc(hidden)]
pub fn reply(code: u8, fill: u8) -> Vec<u8> {
    let mut r = vec![fill; crate::constants::PACKET_SIZE];
    r[0] = code;
    r
}

/// Connect a Device<Ready> over `mock_host()` seeded with `responses`. The
/// returned host shares state with the device so calls can be inspected.
#[doc(hidden)]
pub fn ready_mock_device(
    responses: Vec<Vec<u8>>,
) -> Result<(MockHost, Device<MockHost, Ready<MockHost>>)> {
    let mut host = mock_host();
    for resp in responses {
        host.push_response(resp);
    }
    let device = Device::connect(host.clone(), &TEST_GUID, LinkConfig::default())?;
    Ok((host, device))
}
