use std::time::Duration;

use usbcontrol::host::mock::{MockCall, MockHost};
use usbcontrol::prelude::*;

#[test]
fn scripted_enumeration_failure() {
    let mut host = MockHost::new();
    host.fail_enumeration(2);
    let r = host.interface_paths(&InterfaceGuid::from_u128(1));
    assert!(matches!(r, Err(Error::Os { code: 2, .. })));
}

#[test]
fn session_records_timeouts_and_speed() {
    let mut host = MockHost::new();
    host.set_speed(DeviceSpeed::Low);
    let device = host.open_device(&DevicePath::from("d")).unwrap();
    let mut session = host.initialize_driver(&device).unwrap();

    session
        .set_pipe_timeout(PipeId::new(0x81), Duration::from_millis(250))
        .unwrap();
    assert_eq!(session.device_speed().unwrap(), DeviceSpeed::Low);

    let calls = host.calls();
    assert!(calls.contains(&MockCall::SetPipeTimeout(
        PipeId::new(0x81),
        Duration::from_millis(250)
    )));
    assert!(calls.contains(&MockCall::DeviceSpeed));
}

#[test]
fn read_truncates_to_buffer() {
    let mut host = MockHost::new();
    host.push_response(vec![0x11; 100]);
    let device = host.open_device(&DevicePath::from("d")).unwrap();
    let mut session = host.initialize_driver(&device).unwrap();

    let mut buf = [0u8; 64];
    assert_eq!(session.read_pipe(PipeId::new(0x81), &mut buf).unwrap(), 64);
}
