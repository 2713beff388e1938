//! A single primary GATT service and its two-element flat projection.

use core::fmt::Write as _;
use core::ptr;
use std::rc::Rc;

use crate::characteristic::{Characteristic, ReadCallback, WriteCallback};
use crate::raw::{self, SvcDef};
use crate::registry::CharacteristicRegistry;
use crate::uuid::Uuid128;

/// One service definition: identity plus the owned characteristic
/// registry. Always of the primary kind; secondary and included services
/// are not supported.
pub struct Service {
    uuid: Uuid128,
    registry: CharacteristicRegistry,
    defs: [SvcDef; 2],
}

impl Service {
    pub fn new(uuid: Uuid128) -> Self {
        Self {
            uuid,
            registry: CharacteristicRegistry::new(),
            defs: [SvcDef::end(), SvcDef::end()],
        }
    }

    pub fn uuid(&self) -> &Uuid128 {
        &self.uuid
    }

    /// Append a characteristic, delegating to the owned registry.
    pub fn add_characteristic(&mut self, chr: Rc<Characteristic>) {
        self.registry.add(chr);
    }

    /// Construct and append a characteristic; returns the shared handle.
    pub fn emplace_characteristic(
        &mut self,
        uuid: Uuid128,
        initial_value: &[u8],
        read_cb: Option<ReadCallback>,
        write_cb: Option<WriteCallback>,
    ) -> Rc<Characteristic> {
        self.registry.emplace(uuid, initial_value, read_cb, write_cb)
    }

    pub fn registry(&self) -> &CharacteristicRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CharacteristicRegistry {
        &mut self.registry
    }

    /// Rebuild and return the two-element projection: this service's
    /// struct followed by the sentinel. Forces the registry to republish
    /// its characteristic array first, so the embedded pointer is always
    /// the latest one.
    pub fn svc_defs(&mut self) -> &[SvcDef; 2] {
        let characteristics = self.registry.chr_defs().as_ptr();
        self.defs[0] = SvcDef {
            kind: raw::SVC_TYPE_PRIMARY,
            uuid: self.uuid.header_ptr(),
            includes: ptr::null(),
            characteristics,
        };
        self.defs[1] = SvcDef::end();
        &self.defs
    }

    pub(crate) fn set_log_label(&mut self, label: &'static str) {
        self.registry.set_log_label(label);
    }

    /// Multi-line diagnostic summary of the service and its
    /// characteristics.
    pub fn overview(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Service UUID: {}", self.uuid);
        out.push_str(&self.registry.overview());
        out
    }
}
