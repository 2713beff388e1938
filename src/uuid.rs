//! BLE identifier types in host-stack wire layout.
//!
//! Both UUID widths start with a one-byte kind tag, mirroring the NimBLE
//! `ble_uuid_t` header, so a pointer to either can be handed to the host
//! API wherever a generic UUID pointer is expected.

use core::fmt;

/// Kind tag for a 16-bit UUID.
pub const UUID_KIND_16: u8 = 0;
/// Kind tag for a 128-bit UUID.
pub const UUID_KIND_128: u8 = 2;

/// Characteristic User Description descriptor (assigned number 0x2901).
/// A `static`, not a `const`: projected descriptor slots embed a pointer
/// to it, which must stay valid for the life of the process.
pub static USER_DESCRIPTION: Uuid16 = Uuid16::new(0x2901);

/// The leading kind byte shared by every UUID width.
///
/// The host API addresses UUIDs through a pointer to this header; the full
/// struct is recovered from the `kind` discriminant on the C side.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UuidHeader {
    pub kind: u8,
}

/// A 128-bit identifier. Value semantics; never mutated after construction.
///
/// Bytes are stored least-significant first, the order the host stack
/// expects on the wire.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uuid128 {
    kind: u8,
    value: [u8; 16],
}

impl Uuid128 {
    pub const fn new(v: u128) -> Self {
        Self {
            kind: UUID_KIND_128,
            value: v.to_le_bytes(),
        }
    }

    /// Construct from raw little-endian bytes.
    pub const fn from_le_bytes(value: [u8; 16]) -> Self {
        Self {
            kind: UUID_KIND_128,
            value,
        }
    }

    pub const fn value(&self) -> &[u8; 16] {
        &self.value
    }

    pub const fn as_u128(&self) -> u128 {
        u128::from_le_bytes(self.value)
    }

    /// Pointer to the UUID header, for embedding in projected structs.
    pub(crate) fn header_ptr(&self) -> *const UuidHeader {
        (self as *const Self).cast()
    }
}

impl fmt::Display for Uuid128 {
    /// Canonical 8-4-4-4-12 dashed uppercase hex, most-significant byte
    /// first. Diagnostic output only; not a wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.value;
        write!(
            f,
            "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            v[15], v[14], v[13], v[12], v[11], v[10], v[9], v[8], v[7], v[6], v[5], v[4], v[3],
            v[2], v[1], v[0]
        )
    }
}

/// A 16-bit identifier, used only for the user-description descriptor.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uuid16 {
    kind: u8,
    value: u16,
}

impl Uuid16 {
    pub const fn new(value: u16) -> Self {
        Self {
            kind: UUID_KIND_16,
            value,
        }
    }

    pub const fn value(&self) -> u16 {
        self.value
    }

    pub(crate) fn header_ptr(&self) -> *const UuidHeader {
        (self as *const Self).cast()
    }
}

impl fmt::Display for Uuid16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.value)
    }
}
