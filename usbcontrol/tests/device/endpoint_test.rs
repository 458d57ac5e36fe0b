use proptest::prelude::*;
use usbcontrol::device::endpoints::{classify_pipes, query_endpoints};
use usbcontrol::host::mock::MockHost;
use usbcontrol::prelude::*;

fn bound_session(host: &mut MockHost) -> usbcontrol::host::mock::MockSession {
    let device = host.open_device(&DevicePath::from("dev0")).unwrap();
    host.initialize_driver(&device).unwrap()
}

#[test]
fn non_bulk_pipes_never_populate_the_pair() {
    let pipes = [
        PipeInfo::new(PipeType::Control, 0x80, 64),
        PipeInfo::new(PipeType::Interrupt, 0x81, 8),
        PipeInfo::new(PipeType::Isochronous, 0x02, 1023),
    ];
    assert_eq!(classify_pipes(&pipes), PipePair::default());
}

#[test]
fn descriptor_failure_fails_discovery() {
    crate::common::init_logging();
    let mut host = MockHost::new();
    host.set_pipes(vec![PipeInfo::bulk(0x81), PipeInfo::bulk(0x01)]);
    host.fail_descriptor(22);
    let mut session = bound_session(&mut host);

    assert!(query_endpoints(&mut session, 0).is_err());
}

#[test]
fn every_pipe_failing_still_returns_ok() {
    crate::common::init_logging();
    let mut host = MockHost::new();
    host.set_pipes(vec![PipeInfo::bulk(0x81), PipeInfo::bulk(0x01)]);
    host.fail_pipe(0);
    host.fail_pipe(1);
    let mut session = bound_session(&mut host);

    let scan = query_endpoints(&mut session, 0).unwrap();
    assert_eq!(scan.pipes, PipePair::default());
    assert!(scan.pipes.require().is_err());
}

#[test]
fn alternate_setting_is_passed_through() {
    let mut host = MockHost::new();
    host.set_pipes(vec![PipeInfo::bulk(0x81)]);
    let mut session = bound_session(&mut host);

    let scan = query_endpoints(&mut session, 2).unwrap();
    assert_eq!(scan.interface.alternate_setting, 2);
    assert!(host
        .calls()
        .contains(&usbcontrol::host::mock::MockCall::PipeInfo(2, 0)));
}

proptest! {
    #[test]
    fn one_bulk_pair_retained_when_present(
        noise in prop::collection::vec((prop_oneof![Just(0u8), Just(1u8), Just(3u8)], any::<u8>()), 0..8),
        in_ep in 1u8..16,
        out_ep in 1u8..16,
        split in 0usize..8,
    ) {
        let mut pipes: Vec<PipeInfo> = noise
            .into_iter()
            .map(|(t, id)| PipeInfo::new(PipeType::from_transfer_type(t), id, 64))
            .collect();
        let at = split.min(pipes.len());
        pipes.insert(at, PipeInfo::bulk(0x80 | in_ep));
        pipes.push(PipeInfo::bulk(out_ep));

        let pair = classify_pipes(&pipes);
        prop_assert_eq!(pair.bulk_in, Some(PipeId::new(0x80 | in_ep)));
        prop_assert_eq!(pair.bulk_out, Some(PipeId::new(out_ep)));
    }
}
