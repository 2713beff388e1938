//! Access dispatch through opaque arguments captured at registration
//! time, the way the real host drives the crate.

use std::cell::RefCell;
use std::rc::Rc;

use gatt_table::dispatch::{dispatch, dispatch_descriptor};
use gatt_table::{AccessOp, ServiceTable, Uuid128};

use crate::mock_host::{MockAttributeServer, MockTransport};

fn uuid(n: u128) -> Uuid128 {
    Uuid128::new(n)
}

#[test]
fn read_through_captured_arg_reaches_the_callback() {
    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x10));
    svc.borrow_mut().emplace_characteristic(
        uuid(0x11),
        b"",
        Some(Box::new(|| b"hello".to_vec())),
        None,
    );

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();
    assert_eq!(host.captured_args.len(), 1);

    let mut transport = MockTransport::empty();
    let rc = unsafe { dispatch(host.captured_args[0], AccessOp::Read, &mut transport) };
    assert_eq!(rc, 0);
    assert_eq!(transport.out, b"hello");
}

#[test]
fn write_then_read_round_trips_the_stored_value() {
    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x20));
    svc.borrow_mut()
        .emplace_characteristic(uuid(0x21), b"initial", None, None);

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();
    let arg = host.captured_args[0];

    let mut transport = MockTransport::empty();
    assert_eq!(unsafe { dispatch(arg, AccessOp::Read, &mut transport) }, 0);
    assert_eq!(transport.out, b"initial");

    let mut transport = MockTransport::carrying(b"bye");
    assert_eq!(unsafe { dispatch(arg, AccessOp::Write, &mut transport) }, 0);

    let mut transport = MockTransport::empty();
    assert_eq!(unsafe { dispatch(arg, AccessOp::Read, &mut transport) }, 0);
    assert_eq!(transport.out, b"bye");
}

#[test]
fn write_forwards_payload_to_the_bound_callback() {
    let received: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);

    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x30));
    svc.borrow_mut().emplace_characteristic(
        uuid(0x31),
        b"",
        None,
        Some(Box::new(move |data| {
            sink.borrow_mut().extend_from_slice(data);
        })),
    );

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();

    let mut transport = MockTransport::carrying(b"set-mode");
    let rc = unsafe { dispatch(host.captured_args[0], AccessOp::Write, &mut transport) };
    assert_eq!(rc, 0);
    assert_eq!(*received.borrow(), b"set-mode");
}

#[test]
fn captured_args_survive_later_growth_and_rebuilds() {
    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x40));
    svc.borrow_mut()
        .emplace_characteristic(uuid(0x41), b"first", None, None);

    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();
    let early_arg = host.captured_args[0];

    // Grow past any initial Vec capacity, forcing reallocation of the
    // projected arrays, then re-register.
    for i in 0..16 {
        svc.borrow_mut()
            .emplace_characteristic(uuid(0x100 + i), b"", None, None);
    }
    let mut host = MockAttributeServer::new();
    table.register(&mut host).unwrap();

    // The argument the host captured first still dispatches correctly.
    let mut transport = MockTransport::empty();
    assert_eq!(
        unsafe { dispatch(early_arg, AccessOp::Read, &mut transport) },
        0
    );
    assert_eq!(transport.out, b"first");

    // And it is still the argument projected for that slot today.
    assert_eq!(host.captured_args[0], early_arg);
}

#[test]
fn host_assigned_handle_lands_in_the_characteristic() {
    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x50));
    let chr = svc
        .borrow_mut()
        .emplace_characteristic(uuid(0x51), b"", None, None);

    let defs = table.svc_defs();
    unsafe {
        let slot = &*defs[0].characteristics;
        // The host writes the assigned handle through the out-pointer.
        *slot.val_handle = 0x002A;
    }
    assert_eq!(chr.handle(), 0x002A);
}

#[test]
fn user_description_descriptor_serves_the_name() {
    let mut table = ServiceTable::new();
    let svc = table.emplace_service(uuid(0x60));
    let chr = svc.borrow_mut().registry_mut().emplace_named(
        "Filter Mode",
        uuid(0x61),
        b"",
        None,
        None,
    );

    let arg = Rc::as_ptr(&chr).cast::<core::ffi::c_void>();
    let mut transport = MockTransport::empty();
    let rc = unsafe { dispatch_descriptor(arg, AccessOp::Read, &mut transport) };
    assert_eq!(rc, 0);
    assert_eq!(transport.out, b"Filter Mode");
}
