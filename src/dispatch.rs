//! Cross-cutting access dispatch.
//!
//! The host API supports exactly one C function pointer per registration
//! slot, so per-characteristic behaviour is recovered through the opaque
//! argument registered alongside it: the address of the long-lived
//! [`Characteristic`] allocation. Flat-array rebuilds replace every
//! `ChrDef` slot but never move the characteristics themselves, so an
//! argument captured by the host at registration time keeps dispatching
//! correctly for the lifetime of the owning registry.
//!
//! [`dispatch`] and [`dispatch_descriptor`] are the target-independent
//! forwarding routines; the `extern "C"` trampolines below adapt them to
//! the host's raw callback signature. On non-espidf targets the
//! trampolines are stubs — host-side tests drive the forwarding routines
//! directly through mock transport buffers.

use core::ffi::c_void;

use log::warn;

use crate::characteristic::{AccessOp, Characteristic};
use crate::error::AccessError;
use crate::ports::TransportBuffer;
use crate::raw::AccessCtxt;

/// Forward an access to the characteristic behind `arg` and map the
/// outcome to a host status code (0 = success).
///
/// # Safety
///
/// `arg` must be an opaque argument produced by a registry flat-array
/// build, and the characteristic it points at must still be owned by a
/// live registry or application handle.
pub unsafe fn dispatch(arg: *const c_void, op: AccessOp, ctxt: &mut dyn TransportBuffer) -> i32 {
    let chr = unsafe { &*arg.cast::<Characteristic>() };
    match chr.access(op, ctxt) {
        Ok(()) => 0,
        Err(err) => {
            warn!("access failed (handle={}): {}", chr.handle(), err);
            err.att_code()
        }
    }
}

/// Serve the read-only user-description descriptor of the characteristic
/// behind `arg`: its display name bytes. Writes are rejected.
///
/// # Safety
///
/// Same contract as [`dispatch`].
pub unsafe fn dispatch_descriptor(
    arg: *const c_void,
    op: AccessOp,
    ctxt: &mut dyn TransportBuffer,
) -> i32 {
    let chr = unsafe { &*arg.cast::<Characteristic>() };
    match op {
        AccessOp::Read => {
            let name = chr.name().unwrap_or_default();
            match ctxt.append(name.as_bytes()) {
                Ok(()) => 0,
                Err(_) => AccessError::InsufficientResources.att_code(),
            }
        }
        AccessOp::Write => AccessError::Unsupported.att_code(),
    }
}

// ── Raw trampolines registered in the flat arrays ─────────────

#[cfg(target_os = "espidf")]
pub(crate) extern "C" fn chr_access_cb(
    _conn_handle: u16,
    _attr_handle: u16,
    ctxt: *mut AccessCtxt,
    arg: *mut c_void,
) -> core::ffi::c_int {
    // SAFETY: ctxt and arg come from the host stack for a characteristic
    // this crate registered; the registry holding it outlives registration.
    unsafe { crate::adapters::nimble::trampoline(ctxt, arg, dispatch) }
}

#[cfg(target_os = "espidf")]
pub(crate) extern "C" fn dsc_access_cb(
    _conn_handle: u16,
    _attr_handle: u16,
    ctxt: *mut AccessCtxt,
    arg: *mut c_void,
) -> core::ffi::c_int {
    // SAFETY: as above, for the descriptor slot.
    unsafe { crate::adapters::nimble::trampoline(ctxt, arg, dispatch_descriptor) }
}

// Host builds never receive host-stack callbacks; the slots still carry a
// real function so the projected arrays are fully populated.
#[cfg(not(target_os = "espidf"))]
pub(crate) extern "C" fn chr_access_cb(
    _conn_handle: u16,
    _attr_handle: u16,
    _ctxt: *mut AccessCtxt,
    _arg: *mut c_void,
) -> core::ffi::c_int {
    AccessError::Unsupported.att_code()
}

#[cfg(not(target_os = "espidf"))]
pub(crate) extern "C" fn dsc_access_cb(
    _conn_handle: u16,
    _attr_handle: u16,
    _ctxt: *mut AccessCtxt,
    _arg: *mut c_void,
) -> core::ffi::c_int {
    AccessError::Unsupported.att_code()
}
