//! Characteristic objects and their value-access policy.
//!
//! A [`Characteristic`] owns a UUID, an [`AccessPolicy`] (callbacks or a
//! stored default value), derived capability flags, and the host-assigned
//! handle. It is handed out as `Rc<Characteristic>`: the registry keeps
//! one strong reference as the authoritative owner, the application may
//! keep another to swap callbacks after registration, and the `Rc`
//! allocation address doubles as the opaque dispatch argument registered
//! with the host — stable for the characteristic's whole lifetime, unlike
//! any element of the rebuilt flat arrays.
//!
//! All mutation and dispatch run on one logical thread (the host stack's
//! callback context); interior mutability via `Cell`/`RefCell` is safe
//! under that model and keeps `&self` methods usable through the shared
//! handle.

use core::cell::{Cell, RefCell};
use core::fmt::Write as _;

use log::info;

use crate::error::AccessError;
use crate::ports::TransportBuffer;
use crate::raw::{self, ACCESS_OP_READ_CHR, ACCESS_OP_READ_DSC, ACCESS_OP_WRITE_CHR, ACCESS_OP_WRITE_DSC};
use crate::uuid::{Uuid128, UuidHeader};

/// Produces the current value bytes on a read access.
pub type ReadCallback = Box<dyn FnMut() -> Vec<u8>>;
/// Consumes the payload bytes of a write access.
pub type WriteCallback = Box<dyn FnMut(&[u8])>;

/// Access operation, decoded from the host's raw operation byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    Read,
    Write,
}

impl AccessOp {
    /// Decode a raw characteristic or descriptor operation code.
    /// Returns `None` for operation kinds this design does not support.
    pub fn from_raw(op: u8) -> Option<Self> {
        match op {
            ACCESS_OP_READ_CHR | ACCESS_OP_READ_DSC => Some(Self::Read),
            ACCESS_OP_WRITE_CHR | ACCESS_OP_WRITE_DSC => Some(Self::Write),
            _ => None,
        }
    }
}

/// How a characteristic produces and consumes its value: an optional
/// callback per direction plus a stored default value that stands in
/// whenever the matching callback is unbound.
#[derive(Default)]
pub struct AccessPolicy {
    read: Option<ReadCallback>,
    write: Option<WriteCallback>,
    value: Vec<u8>,
}

impl AccessPolicy {
    /// General form: a stored default value plus an optional callback per
    /// direction. The stored value serves reads when no read callback is
    /// bound and absorbs writes when no write callback is bound.
    pub fn new(
        initial_value: &[u8],
        read: Option<ReadCallback>,
        write: Option<WriteCallback>,
    ) -> Self {
        Self {
            read,
            write,
            value: initial_value.to_vec(),
        }
    }

    /// No callbacks, empty stored value: reads return nothing, writes
    /// replace the stored value.
    pub fn none() -> Self {
        Self::default()
    }

    /// A plain in-memory value with default get/set behaviour.
    pub fn fixed(value: &[u8]) -> Self {
        Self::new(value, None, None)
    }

    pub fn read_only(read: ReadCallback) -> Self {
        Self::new(&[], Some(read), None)
    }

    pub fn write_only(write: WriteCallback) -> Self {
        Self::new(&[], None, Some(write))
    }

    pub fn read_write(read: ReadCallback, write: WriteCallback) -> Self {
        Self::new(&[], Some(read), Some(write))
    }

    /// Capability flags advertised to clients. Read iff a read callback
    /// is bound, write iff a write callback is bound, and notify implied
    /// whenever read is available.
    fn capability_flags(&self) -> u16 {
        let mut flags = 0;
        if self.read.is_some() {
            flags |= raw::CHR_F_READ | raw::CHR_F_NOTIFY;
        }
        if self.write.is_some() {
            flags |= raw::CHR_F_WRITE;
        }
        flags
    }
}

/// A single GATT characteristic definition with live access behaviour.
pub struct Characteristic {
    uuid: Uuid128,
    name: Option<String>,
    policy: RefCell<AccessPolicy>,
    flags: Cell<u16>,
    handle: Cell<u16>,
    log_label: Cell<&'static str>,
}

impl Characteristic {
    pub fn new(uuid: Uuid128, policy: AccessPolicy) -> Self {
        let flags = policy.capability_flags();
        Self {
            uuid,
            name: None,
            policy: RefCell::new(policy),
            flags: Cell::new(flags),
            handle: Cell::new(0),
            log_label: Cell::new(crate::config::GattConfig::default().log_label),
        }
    }

    /// A characteristic with a human-readable display name. The name is
    /// published as a read-only user-description descriptor.
    pub fn named(name: &str, uuid: Uuid128, policy: AccessPolicy) -> Self {
        let mut chr = Self::new(uuid, policy);
        chr.name = Some(name.to_owned());
        chr
    }

    /// Read-only fixed value convenience constructor.
    pub fn fixed(uuid: Uuid128, value: &[u8]) -> Self {
        let stored = value.to_vec();
        Self::new(
            uuid,
            AccessPolicy::read_only(Box::new(move || stored.clone())),
        )
    }

    pub fn uuid(&self) -> &Uuid128 {
        &self.uuid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn flags(&self) -> u16 {
        self.flags.get()
    }

    pub fn handle(&self) -> u16 {
        self.handle.get()
    }

    /// Record the host-assigned handle. Idempotent; the host assigns it
    /// once per registration cycle.
    pub fn set_handle(&self, handle: u16) {
        self.handle.set(handle);
    }

    /// Out-pointer the host writes the assigned handle through during
    /// registration. Points into this allocation, so it stays valid
    /// across flat-array rebuilds.
    pub(crate) fn handle_ptr(&self) -> *mut u16 {
        self.handle.as_ptr()
    }

    pub(crate) fn uuid_ptr(&self) -> *const UuidHeader {
        self.uuid.header_ptr()
    }

    pub(crate) fn set_log_label(&self, label: &'static str) {
        self.log_label.set(label);
    }

    /// Replace the read callback. Widens the advertised capability flags
    /// if the characteristic was not previously readable; notify is
    /// implied whenever read becomes available. Flags never narrow.
    pub fn set_read_callback(&self, read: ReadCallback) {
        self.policy.borrow_mut().read = Some(read);
        let flags = self.flags.get();
        if flags & raw::CHR_F_READ == 0 {
            self.flags.set(flags | raw::CHR_F_READ | raw::CHR_F_NOTIFY);
        }
    }

    /// Replace the write callback, widening the flags if the
    /// characteristic was not previously writable.
    pub fn set_write_callback(&self, write: WriteCallback) {
        self.policy.borrow_mut().write = Some(write);
        let flags = self.flags.get();
        if flags & raw::CHR_F_WRITE == 0 {
            self.flags.set(flags | raw::CHR_F_WRITE);
        }
    }

    /// Single access entry point for both operations.
    ///
    /// Read: the bound callback's bytes, or the stored value when no
    /// callback is bound, appended to the transport buffer. Write: the
    /// payload is forwarded to the bound callback, or stored as the new
    /// value when none is bound — whatever bytes arrived are passed
    /// through; a callback that cares about length or format rejects
    /// them itself.
    pub fn access(
        &self,
        op: AccessOp,
        ctxt: &mut dyn TransportBuffer,
    ) -> Result<(), AccessError> {
        match op {
            AccessOp::Read => {
                let mut policy = self.policy.borrow_mut();
                let value = match policy.read.as_mut() {
                    Some(read) => read(),
                    None => policy.value.clone(),
                };
                info!(
                    "{}: characteristic read (handle={}, {} bytes)",
                    self.log_label.get(),
                    self.handle.get(),
                    value.len()
                );
                ctxt.append(&value)
                    .map_err(|_| AccessError::InsufficientResources)
            }
            AccessOp::Write => {
                let payload = ctxt.payload().to_vec();
                info!(
                    "{}: characteristic write (handle={}, {} bytes)",
                    self.log_label.get(),
                    self.handle.get(),
                    payload.len()
                );
                let mut policy = self.policy.borrow_mut();
                match policy.write.as_mut() {
                    Some(write) => write(&payload),
                    None => policy.value = payload,
                }
                Ok(())
            }
        }
    }

    /// One-line diagnostic summary.
    pub fn overview(&self) -> String {
        let mut out = String::new();
        match &self.name {
            Some(name) => {
                let _ = write!(out, "'{}' UUID: {}", name, self.uuid);
            }
            None => {
                let _ = write!(out, "UUID: {}", self.uuid);
            }
        }
        out
    }
}
