//! `#[repr(C)]` mirrors of the attribute-server definition structs.
//!
//! The host registration API consumes flat, null-terminated C arrays of
//! these structs rather than an object graph. Each array ends in a zeroed
//! sentinel element instead of carrying a length. The layouts follow the
//! NimBLE `ble_gatt_svc_def` / `ble_gatt_chr_def` / `ble_gatt_dsc_def`
//! family field for field.
//!
//! These structs carry raw pointers into owning collections elsewhere in
//! the crate; they are plain data and perform no lifetime tracking of
//! their own. See [`crate::registry`] for the rebuild discipline that
//! keeps the embedded pointers valid.

use core::ffi::{c_int, c_void};
use core::ptr;

use crate::uuid::UuidHeader;

// ── Capability flags (ble_gatt_chr_flags) ─────────────────────

pub const CHR_F_READ: u16 = 0x0002;
pub const CHR_F_WRITE_NO_RSP: u16 = 0x0004;
pub const CHR_F_WRITE: u16 = 0x0008;
pub const CHR_F_NOTIFY: u16 = 0x0010;

/// Descriptor attribute flag: readable.
pub const ATT_F_READ: u8 = 0x01;

// ── Access operation codes (ble_gatt_access_op) ───────────────

pub const ACCESS_OP_READ_CHR: u8 = 0;
pub const ACCESS_OP_WRITE_CHR: u8 = 1;
pub const ACCESS_OP_READ_DSC: u8 = 2;
pub const ACCESS_OP_WRITE_DSC: u8 = 3;

// ── ATT status codes returned to the host ─────────────────────

pub const ATT_ERR_UNLIKELY: u8 = 0x0E;
pub const ATT_ERR_INSUFFICIENT_RES: u8 = 0x11;

// ── Service kinds ─────────────────────────────────────────────

/// Sentinel kind: downstream consumers treat this as end-of-array.
pub const SVC_TYPE_END: u8 = 0;
pub const SVC_TYPE_PRIMARY: u8 = 1;

/// Opaque host-stack packet buffer (`os_mbuf`). Never dereferenced here;
/// the espidf adapter passes it back to the host's mbuf routines.
#[repr(C)]
pub struct OsMbuf {
    _opaque: [u8; 0],
}

/// Inbound access context handed to the registered callback:
/// the operation code plus the transport buffer the response is appended
/// to (read) or the payload arrives in (write).
#[repr(C)]
pub struct AccessCtxt {
    pub op: u8,
    pub om: *mut OsMbuf,
}

/// The single C-compatible access entry-point signature the host supports
/// per registration slot. `arg` is the opaque per-characteristic context
/// registered alongside it.
pub type AccessFn =
    extern "C" fn(conn_handle: u16, attr_handle: u16, ctxt: *mut AccessCtxt, arg: *mut c_void) -> c_int;

/// One descriptor slot in a characteristic's descriptor sub-array.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct DscDef {
    pub uuid: *const UuidHeader,
    pub att_flags: u8,
    pub min_key_size: u8,
    pub access_cb: Option<AccessFn>,
    pub arg: *mut c_void,
}

impl DscDef {
    pub const fn end() -> Self {
        Self {
            uuid: ptr::null(),
            att_flags: 0,
            min_key_size: 0,
            access_cb: None,
            arg: ptr::null_mut(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.uuid.is_null()
    }
}

/// One characteristic slot in a service's characteristic array.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ChrDef {
    pub uuid: *const UuidHeader,
    pub access_cb: Option<AccessFn>,
    pub arg: *mut c_void,
    /// Null-terminated descriptor sub-array, or null when none.
    pub descriptors: *const DscDef,
    pub flags: u16,
    pub min_key_size: u8,
    /// The host writes the assigned value handle through this pointer
    /// during registration.
    pub val_handle: *mut u16,
    /// Characteristic presentation format descriptors; unused.
    pub cpfd: *const c_void,
}

impl ChrDef {
    pub const fn end() -> Self {
        Self {
            uuid: ptr::null(),
            access_cb: None,
            arg: ptr::null_mut(),
            descriptors: ptr::null(),
            flags: 0,
            min_key_size: 0,
            val_handle: ptr::null_mut(),
            cpfd: ptr::null(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.uuid.is_null()
    }
}

/// One service slot in the table's registration array.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct SvcDef {
    pub kind: u8,
    pub uuid: *const UuidHeader,
    /// Included services; always null in this design.
    pub includes: *const *const SvcDef,
    /// Null-terminated characteristic array.
    pub characteristics: *const ChrDef,
}

impl SvcDef {
    pub const fn end() -> Self {
        Self {
            kind: SVC_TYPE_END,
            uuid: ptr::null(),
            includes: ptr::null(),
            characteristics: ptr::null(),
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == SVC_TYPE_END
    }
}
