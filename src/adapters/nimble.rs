//! NimBLE host-stack adapter (ESP-IDF targets only).
//!
//! Declares the handful of host entry points this crate needs against its
//! own `#[repr(C)]` mirrors, wraps the host's `os_mbuf` packet buffer
//! behind the [`TransportBuffer`] port, and adapts the raw access
//! callback signature to the crate's dispatch routines.

#![cfg(target_os = "espidf")]

use core::ffi::{c_int, c_void};

// Pulls in the ESP-IDF runtime and the NimBLE symbols we link against.
use esp_idf_sys as _;

use crate::characteristic::AccessOp;
use crate::error::AccessError;
use crate::ports::{AttributeServer, BufferFull, TransportBuffer};
use crate::raw::{AccessCtxt, OsMbuf, SvcDef};

/// Largest attribute payload the adapter will flatten out of an inbound
/// mbuf chain (the ATT maximum attribute value length).
const MAX_ATT_PAYLOAD: usize = 512;

unsafe extern "C" {
    fn ble_gatts_count_cfg(defs: *const SvcDef) -> c_int;
    fn ble_gatts_add_svcs(defs: *const SvcDef) -> c_int;
    fn os_mbuf_append(om: *mut OsMbuf, data: *const c_void, len: u16) -> c_int;
    fn ble_hs_mbuf_to_flat(om: *const OsMbuf, flat: *mut c_void, max_len: u16, out_len: *mut u16)
        -> c_int;
}

/// [`TransportBuffer`] over the host's `os_mbuf` chain: inbound payloads
/// are flattened once at construction, outbound data is appended straight
/// onto the chain.
pub struct MbufBuffer {
    om: *mut OsMbuf,
    payload: heapless::Vec<u8, MAX_ATT_PAYLOAD>,
}

impl MbufBuffer {
    /// # Safety
    ///
    /// `om` must be the live mbuf handed to an access callback by the
    /// host stack, and must not outlive that callback invocation.
    pub unsafe fn new(om: *mut OsMbuf) -> Self {
        let mut payload = heapless::Vec::new();
        if !om.is_null() {
            let mut len: u16 = 0;
            let rc = unsafe {
                ble_hs_mbuf_to_flat(
                    om,
                    payload.as_mut_ptr().cast::<c_void>(),
                    MAX_ATT_PAYLOAD as u16,
                    &mut len,
                )
            };
            if rc == 0 {
                // SAFETY: the host wrote `len` bytes into the backing
                // array, and len <= MAX_ATT_PAYLOAD was enforced above.
                unsafe { payload.set_len(usize::from(len)) };
            }
        }
        Self { om, payload }
    }
}

impl TransportBuffer for MbufBuffer {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn append(&mut self, data: &[u8]) -> Result<(), BufferFull> {
        let Ok(len) = u16::try_from(data.len()) else {
            return Err(BufferFull);
        };
        // SAFETY: self.om is the callback's live mbuf per the `new`
        // contract; data is borrowed for the duration of the call.
        let rc = unsafe { os_mbuf_append(self.om, data.as_ptr().cast::<c_void>(), len) };
        if rc == 0 { Ok(()) } else { Err(BufferFull) }
    }
}

/// Adapt a raw host callback invocation to one of the crate's dispatch
/// routines. Unknown operation codes and null contexts map to the
/// host-unlikely status rather than a panic across the FFI boundary.
///
/// # Safety
///
/// `ctxt` and `arg` must be the pointers the host stack passed to the
/// registered access callback.
pub(crate) unsafe fn trampoline(
    ctxt: *mut AccessCtxt,
    arg: *mut c_void,
    forward: unsafe fn(*const c_void, AccessOp, &mut dyn TransportBuffer) -> i32,
) -> c_int {
    if ctxt.is_null() || arg.is_null() {
        return AccessError::Unsupported.att_code();
    }
    let ctxt = unsafe { &*ctxt };
    let Some(op) = AccessOp::from_raw(ctxt.op) else {
        return AccessError::Unsupported.att_code();
    };
    let mut buffer = unsafe { MbufBuffer::new(ctxt.om) };
    unsafe { forward(arg, op, &mut buffer) }
}

/// [`AttributeServer`] over the real NimBLE registration calls.
#[derive(Default)]
pub struct NimbleHost;

impl NimbleHost {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeServer for NimbleHost {
    fn count_cfg(&mut self, svcs: *const SvcDef) -> i32 {
        // SAFETY: the table hands us its sentinel-terminated array, kept
        // alive by the table for as long as registration needs it.
        unsafe { ble_gatts_count_cfg(svcs) }
    }

    fn add_svcs(&mut self, svcs: *const SvcDef) -> i32 {
        // SAFETY: as above.
        unsafe { ble_gatts_add_svcs(svcs) }
    }
}
