//! Fuzz target: table mutation and projection sequences.
//!
//! Drives arbitrary interleavings of service/characteristic insertions,
//! flag widenings, dispatched accesses, and projection rebuilds, and
//! asserts the structural invariants hold after every step: the arrays
//! stay sentinel-terminated, slot counts match entry counts, and no
//! operation panics.
//!
//! cargo fuzz run fuzz_table_ops

#![no_main]

use std::cell::RefCell;
use std::rc::Rc;

use gatt_table::dispatch::dispatch;
use gatt_table::{
    AccessOp, BufferFull, Service, ServiceTable, TransportBuffer, Uuid128,
};
use libfuzzer_sys::fuzz_target;

struct FuzzTransport {
    payload: Vec<u8>,
    out: Vec<u8>,
}

impl TransportBuffer for FuzzTransport {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn append(&mut self, data: &[u8]) -> Result<(), BufferFull> {
        self.out.extend_from_slice(data);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let mut table = ServiceTable::new();
    let mut services: Vec<Rc<RefCell<Service>>> = Vec::new();
    let mut chrs = Vec::new();
    let mut next_uuid: u128 = 1;

    let mut bytes = data.iter().copied();
    while let Some(op) = bytes.next() {
        match op % 6 {
            0 => {
                services.push(table.emplace_service(Uuid128::new(next_uuid)));
                next_uuid += 1;
            }
            1 => {
                if let Some(svc) = services.last() {
                    let with_read = bytes.next().unwrap_or(0) & 1 != 0;
                    let with_write = bytes.next().unwrap_or(0) & 1 != 0;
                    let read = with_read
                        .then(|| -> gatt_table::ReadCallback { Box::new(|| vec![0xAB]) });
                    let write =
                        with_write.then(|| -> gatt_table::WriteCallback { Box::new(|_| {}) });
                    let chr = svc.borrow_mut().emplace_characteristic(
                        Uuid128::new(next_uuid),
                        b"seed",
                        read,
                        write,
                    );
                    next_uuid += 1;
                    chrs.push(chr);
                }
            }
            2 => {
                if let Some(chr) = chrs.last() {
                    chr.set_read_callback(Box::new(Vec::new));
                }
            }
            3 => {
                if let Some(chr) = chrs.last() {
                    chr.set_write_callback(Box::new(|_| {}));
                }
            }
            4 => {
                let idx = usize::from(bytes.next().unwrap_or(0));
                if let Some(chr) = chrs.get(idx % chrs.len().max(1)) {
                    let op = if bytes.next().unwrap_or(0) & 1 == 0 {
                        AccessOp::Read
                    } else {
                        AccessOp::Write
                    };
                    let mut transport = FuzzTransport {
                        payload: vec![0x42; usize::from(bytes.next().unwrap_or(0))],
                        out: Vec::new(),
                    };
                    let arg = Rc::as_ptr(chr).cast::<core::ffi::c_void>();
                    let _ = unsafe { dispatch(arg, op, &mut transport) };
                }
            }
            _ => {
                let defs = table.svc_defs();
                assert_eq!(defs.len(), services.len() + 1);
                assert!(defs[services.len()].is_end());
                for def in &defs[..services.len()] {
                    assert!(!def.is_end());
                    assert!(!def.characteristics.is_null());
                }
            }
        }
    }

    // Final projection is always well-formed whatever the sequence did.
    let defs = table.svc_defs();
    assert!(defs[defs.len() - 1].is_end());
});
