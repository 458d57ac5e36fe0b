use usbcontrol::host::mock::MockCall;
use usbcontrol::prelude::*;
use usbcontrol::test_support::{mock_host, TEST_GUID, TEST_PATH};

#[test]
fn open_bind_discover_in_order() {
    crate::common::init_logging();
    let host = mock_host();

    let opened: Device<_, Opened> = Device::open(host.clone(), &TEST_GUID, LinkConfig::default()).unwrap();
    assert_eq!(opened.path().as_str(), TEST_PATH);

    let bound = opened.bind().unwrap();
    let ready: Device<_, Ready<_>> = bound.discover_endpoints().unwrap();
    assert_eq!(ready.pipes().bulk_in, PipeId::new(0x81));
    assert_eq!(ready.pipes().bulk_out, PipeId::new(0x01));

    let calls = host.calls();
    let open = calls.iter().position(|c| matches!(c, MockCall::Open(_))).unwrap();
    let init = calls
        .iter()
        .position(|c| matches!(c, MockCall::InitializeDriver(_)))
        .unwrap();
    let desc = calls
        .iter()
        .position(|c| matches!(c, MockCall::InterfaceDescriptor(0)))
        .unwrap();
    assert!(open < init && init < desc);
}

#[test]
fn driver_init_failure_is_reported() {
    let mut host = mock_host();
    host.fail_driver_init(31);
    let r = Device::open(host, &TEST_GUID, LinkConfig::default())
        .unwrap()
        .bind();
    assert!(matches!(r, Err(Error::DriverInit(_))));
}

#[test]
fn dropping_a_ready_device_releases_in_order() {
    let host = mock_host();
    let dev = Device::connect(host.clone(), &TEST_GUID, LinkConfig::default()).unwrap();
    drop(dev);

    let tail: Vec<MockCall> = host.calls().into_iter().rev().take(2).collect();
    assert_eq!(tail[1], MockCall::ReleaseSession(DevicePath::from(TEST_PATH)));
    assert_eq!(tail[0], MockCall::CloseDevice(DevicePath::from(TEST_PATH)));
}

#[test]
fn speed_from_ready_device() {
    let mut host = mock_host();
    host.set_speed(DeviceSpeed::High);
    let mut dev = DeviceBuilder::new()
        .with_host(host)
        .connect(&TEST_GUID)
        .unwrap();
    assert_eq!(dev.speed().unwrap(), DeviceSpeed::High);
}
