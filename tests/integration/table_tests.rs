//! End-to-end table assembly and registration against the mock host.

use gatt_table::{RegisterError, ServiceTable, Uuid128};

use crate::mock_host::MockAttributeServer;

fn uuid(n: u128) -> Uuid128 {
    Uuid128::new(n)
}

#[test]
fn registered_array_concatenates_all_services() {
    let mut table = ServiceTable::new();
    let env = table.emplace_service(uuid(0xE0));
    env.borrow_mut()
        .emplace_characteristic(uuid(0xE1), b"21.5", None, None);
    env.borrow_mut()
        .emplace_characteristic(uuid(0xE2), b"48", None, None);
    let ctl = table.emplace_service(uuid(0xC0));
    ctl.borrow_mut()
        .emplace_characteristic(uuid(0xC1), b"auto", None, None);

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();

    assert_eq!(host.count_cfg_calls.len(), 1);
    assert_eq!(host.add_svcs_calls.len(), 1);
    // Both calls see the same array.
    assert_eq!(host.count_cfg_calls[0], host.add_svcs_calls[0]);

    let (services, characteristics) = MockAttributeServer::walk(host.add_svcs_calls[0]);
    assert_eq!(services, 2);
    assert_eq!(characteristics, 3);
}

#[test]
fn empty_table_still_makes_both_calls_with_lone_sentinel() {
    let mut table = ServiceTable::new();
    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();

    assert_eq!(host.count_cfg_calls.len(), 1);
    assert_eq!(host.add_svcs_calls.len(), 1);
    let (services, characteristics) = MockAttributeServer::walk(host.add_svcs_calls[0]);
    assert_eq!(services, 0);
    assert_eq!(characteristics, 0);
}

#[test]
fn count_cfg_failure_skips_commit() {
    let mut table = ServiceTable::new();
    table.emplace_service(uuid(1));

    let mut host = MockAttributeServer::new();
    host.count_cfg_status = 6;

    assert_eq!(
        table.register(&mut host).unwrap_err(),
        RegisterError::CountCfg(6)
    );
    assert!(host.add_svcs_calls.is_empty());
}

#[test]
fn host_status_codes_pass_through_unmapped() {
    let mut table = ServiceTable::new();
    table.emplace_service(uuid(1));

    let mut host = MockAttributeServer::new();
    host.add_svcs_status = -259;

    let err = table.register(&mut host).unwrap_err();
    assert_eq!(err, RegisterError::AddSvcs(-259));
    assert_eq!(err.code(), -259);
}

#[test]
fn reregistration_reflects_services_added_in_between() {
    let mut table = ServiceTable::new();
    table.emplace_service(uuid(1));

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();
    assert_eq!(MockAttributeServer::walk(host.add_svcs_calls[0]).0, 1);

    table.emplace_service(uuid(2));
    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();
    assert_eq!(MockAttributeServer::walk(host.add_svcs_calls[0]).0, 2);
}

#[test]
fn advertised_uuids_cover_every_service() {
    let mut table = ServiceTable::new();
    table.emplace_service(uuid(0xAA));
    table.emplace_service(uuid(0xBB));

    let uuids = table.service_uuids();
    assert_eq!(uuids.len(), 2);
    assert_eq!(uuids[0].as_u128(), 0xAA);
    assert_eq!(uuids[1].as_u128(), 0xBB);
}
