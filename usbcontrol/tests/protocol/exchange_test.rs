use usbcontrol::host::mock::MockCall;
use usbcontrol::prelude::*;
use usbcontrol::test_support::ready_mock_device;

use crate::common::fixtures::{error_reply, ok_reply, sample_request};

#[test]
fn matching_response_reports_bytes_read() {
    crate::common::init_logging();
    let (host, mut dev) = ready_mock_device(vec![ok_reply()]).unwrap();

    let mut packet = sample_request();
    let out = dev.send_config(&mut packet).unwrap();
    assert_eq!(out.bytes_written, 64);
    assert_eq!(out.bytes_read, 64);
    assert_eq!(out.response_code, 0x01);

    let written = host.written();
    assert_eq!(written.len(), 1);
    assert_eq!(&written[0][..3], &[0x20, 0x03, 0xe8]);
    assert_eq!(written[0].len(), 64);
}

#[test]
fn write_goes_out_then_read_comes_in_on_bulk_pipes() {
    let (host, mut dev) = ready_mock_device(vec![ok_reply()]).unwrap();
    let mut packet = sample_request();
    dev.send_config(&mut packet).unwrap();

    let transfers: Vec<MockCall> = host
        .calls()
        .into_iter()
        .filter(|c| matches!(c, MockCall::Write(..) | MockCall::Read(..)))
        .collect();
    assert_eq!(transfers.len(), 2);
    assert!(matches!(&transfers[0], MockCall::Write(p, _) if *p == PipeId::new(0x01)));
    assert_eq!(transfers[1], MockCall::Read(PipeId::new(0x81), 64));
}

#[test]
fn mismatching_response_is_distinguishable_from_any_count() {
    crate::common::init_logging();
    let (_host, mut dev) = ready_mock_device(vec![error_reply(0x7e)]).unwrap();

    let mut packet = sample_request();
    match dev.send_config(&mut packet) {
        Err(Error::UnexpectedResponse { expected, actual }) => {
            assert_eq!(expected, 0x01);
            assert_eq!(actual, 0x7e);
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}

#[test]
fn configured_response_code_is_used() {
    let mut host = usbcontrol::test_support::mock_host();
    host.push_response(usbcontrol::test_support::reply(0xa5, 0));
    let mut dev = DeviceBuilder::new()
        .with_host(host)
        .response_code(0xa5)
        .connect(&usbcontrol::test_support::TEST_GUID)
        .unwrap();

    let mut packet = Packet::zeroed();
    assert_eq!(dev.send_config(&mut packet).unwrap().response_code, 0xa5);
}

#[test]
fn consecutive_exchanges_reuse_the_session() {
    let (host, mut dev) = ready_mock_device(vec![ok_reply(), ok_reply(), error_reply(0)]).unwrap();
    let mut packet = sample_request();

    assert!(dev.send_config(&mut packet).is_ok());
    assert!(dev.send_config(&mut packet).is_ok());
    assert!(dev.send_config(&mut packet).is_err());
    assert_eq!(host.written().len(), 3);
    let inits = host
        .calls()
        .iter()
        .filter(|c| matches!(c, MockCall::InitializeDriver(_)))
        .count();
    assert_eq!(inits, 1);
}
