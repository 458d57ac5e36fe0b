use usbcontrol::device::discovery::open_device;
use usbcontrol::host::mock::{MockCall, MockHost};
use usbcontrol::prelude::*;
use usbcontrol::test_support::TEST_GUID;

#[test]
fn zero_devices_reports_not_found_without_open() {
    crate::common::init_logging();
    let mut host = MockHost::new();

    let r = open_device(&mut host, &TEST_GUID, SelectionPolicy::Last);
    assert!(matches!(r, Err(Error::DeviceNotFound)));
    assert!(host.opened().is_empty());
    assert!(!host.calls().iter().any(|c| matches!(c, MockCall::Open(_))));
}

#[test]
fn multiple_matches_open_the_last_enumerated() {
    crate::common::init_logging();
    let mut host = MockHost::new();
    for i in 0..4 {
        host.add_device(format!("\\\\?\\usb#vid_0483&pid_5740#{:04}", i));
    }

    let (path, _device) = open_device(&mut host, &TEST_GUID, SelectionPolicy::Last).unwrap();
    assert_eq!(path.as_str(), "\\\\?\\usb#vid_0483&pid_5740#0003");
    assert_eq!(host.opened(), vec![path]);
}

#[test]
fn unique_policy_rejects_ambiguity_without_open() {
    let mut host = MockHost::new();
    host.add_device("a");
    host.add_device("b");

    let r = Device::open(
        host.clone(),
        &TEST_GUID,
        LinkConfig {
            selection: SelectionPolicy::Unique,
            ..LinkConfig::default()
        },
    );
    assert!(matches!(r, Err(Error::AmbiguousDevice { count: 2 })));
    assert!(host.opened().is_empty());
}

#[test]
fn enumeration_is_queried_with_the_callers_guid() {
    let mut host = MockHost::new();
    host.add_device("a");
    let guid: InterfaceGuid = "{A5DCBF10-6530-11D2-901F-00C04FB951ED}".parse().unwrap();

    let _ = open_device(&mut host, &guid, SelectionPolicy::First).unwrap();
    assert_eq!(host.calls()[0], MockCall::InterfacePaths(guid));
}
