//! Characteristic registry: owns characteristics and republishes their
//! flat-array projection.
//!
//! ## Pointer-stability discipline
//!
//! The projected `ChrDef` array lives in a plain `Vec` that is fully
//! rebuilt on every [`chr_defs`](CharacteristicRegistry::chr_defs) call —
//! never patched incrementally, never cached across a mutation. Every
//! pointer embedded in a projected slot targets storage whose address
//! survives container growth:
//!
//! - UUID and handle out-pointers point into the `Rc<Characteristic>`
//!   allocation, which never moves.
//! - The opaque dispatch argument is that same allocation address, never
//!   a flat-array slot.
//! - Descriptor sub-arrays are boxed per entry, so growing the entry list
//!   does not move them.
//!
//! The only pointers invalidated by an insertion are those into the
//! `ChrDef` vector itself, and those are reissued by the unconditional
//! rebuild before anyone can observe a stale array.

use core::ffi::c_void;
use core::fmt::Write as _;
use core::ptr;
use std::rc::Rc;

use crate::characteristic::{AccessPolicy, Characteristic, ReadCallback, WriteCallback};
use crate::dispatch;
use crate::raw::{self, ChrDef, DscDef};
use crate::uuid::{Uuid128, USER_DESCRIPTION};

struct Entry {
    chr: Rc<Characteristic>,
    /// User-description descriptor pair ([descriptor, sentinel]) when the
    /// characteristic carries a display name. Boxed for address stability.
    descriptors: Option<Box<[DscDef; 2]>>,
}

/// Ordered collection of characteristics plus their derived flat array.
pub struct CharacteristicRegistry {
    entries: Vec<Entry>,
    defs: Vec<ChrDef>,
    log_label: &'static str,
}

impl Default for CharacteristicRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacteristicRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            defs: Vec::new(),
            log_label: crate::config::GattConfig::default().log_label,
        }
    }

    /// Append a characteristic. The cached flat projection becomes stale
    /// and is rebuilt on the next [`chr_defs`](Self::chr_defs) call.
    pub fn add(&mut self, chr: Rc<Characteristic>) {
        chr.set_log_label(self.log_label);
        let descriptors = chr.name().map(|_| {
            Box::new([
                DscDef {
                    uuid: USER_DESCRIPTION.header_ptr(),
                    att_flags: raw::ATT_F_READ,
                    min_key_size: 0,
                    access_cb: Some(dispatch::dsc_access_cb),
                    arg: Rc::as_ptr(&chr).cast_mut().cast::<c_void>(),
                },
                DscDef::end(),
            ])
        });
        self.entries.push(Entry { chr, descriptors });
        self.defs.clear();
    }

    /// Construct a characteristic in place and return the shared handle,
    /// so the caller can keep mutating its callbacks after insertion.
    pub fn emplace(
        &mut self,
        uuid: Uuid128,
        initial_value: &[u8],
        read_cb: Option<ReadCallback>,
        write_cb: Option<WriteCallback>,
    ) -> Rc<Characteristic> {
        self.emplace_inner(None, uuid, initial_value, read_cb, write_cb)
    }

    /// [`emplace`](Self::emplace) with a display name, published as a
    /// user-description descriptor.
    pub fn emplace_named(
        &mut self,
        name: &str,
        uuid: Uuid128,
        initial_value: &[u8],
        read_cb: Option<ReadCallback>,
        write_cb: Option<WriteCallback>,
    ) -> Rc<Characteristic> {
        self.emplace_inner(Some(name), uuid, initial_value, read_cb, write_cb)
    }

    fn emplace_inner(
        &mut self,
        name: Option<&str>,
        uuid: Uuid128,
        initial_value: &[u8],
        read_cb: Option<ReadCallback>,
        write_cb: Option<WriteCallback>,
    ) -> Rc<Characteristic> {
        let policy = AccessPolicy::new(initial_value, read_cb, write_cb);
        let chr = Rc::new(match name {
            Some(name) => Characteristic::named(name, uuid, policy),
            None => Characteristic::new(uuid, policy),
        });
        self.add(Rc::clone(&chr));
        chr
    }

    /// Number of real entries, sentinel excluded.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// The shared characteristic handles, in insertion order.
    pub fn characteristics(&self) -> impl Iterator<Item = &Rc<Characteristic>> {
        self.entries.iter().map(|entry| &entry.chr)
    }

    /// Rebuild and return the sentinel-terminated flat array: one slot
    /// per characteristic in insertion order, then one zeroed sentinel.
    /// Always reflects the latest entry set.
    pub fn chr_defs(&mut self) -> &[ChrDef] {
        self.rebuild();
        &self.defs
    }

    fn rebuild(&mut self) {
        self.defs.clear();
        for entry in &self.entries {
            self.defs.push(ChrDef {
                uuid: entry.chr.uuid_ptr(),
                access_cb: Some(dispatch::chr_access_cb),
                // Dispatch context is the long-lived characteristic
                // allocation, not this rebuilt slot.
                arg: Rc::as_ptr(&entry.chr).cast_mut().cast::<c_void>(),
                descriptors: entry
                    .descriptors
                    .as_ref()
                    .map_or(ptr::null(), |d| d.as_ptr()),
                flags: entry.chr.flags(),
                min_key_size: 0,
                val_handle: entry.chr.handle_ptr(),
                cpfd: ptr::null(),
            });
        }
        self.defs.push(ChrDef::end());
    }

    pub(crate) fn set_log_label(&mut self, label: &'static str) {
        self.log_label = label;
        for entry in &self.entries {
            entry.chr.set_log_label(label);
        }
    }

    /// Indexed multi-line listing of every characteristic.
    pub fn overview(&self) -> String {
        let mut out = String::from("Characteristics:\n");
        for (idx, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(out, "  [{}] {}", idx, entry.chr.overview());
        }
        out
    }
}
