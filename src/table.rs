//! Service table: the top-level registry handed to the attribute server.
//!
//! Owns the ordered service collection, concatenates each service's flat
//! projection (minus its per-service sentinel) into one global array with
//! a single trailing sentinel, and drives the two-call registration
//! sequence against the [`AttributeServer`] port.

use core::fmt::Write as _;
use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};

use crate::config::{GattConfig, MAX_ADV_SERVICES};
use crate::error::RegisterError;
use crate::ports::AttributeServer;
use crate::raw::SvcDef;
use crate::service::Service;
use crate::uuid::Uuid128;

/// Ordered collection of services plus the concatenated flat projection.
pub struct ServiceTable {
    config: GattConfig,
    services: Vec<Rc<RefCell<Service>>>,
    defs: Vec<SvcDef>,
}

impl Default for ServiceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceTable {
    pub fn new() -> Self {
        Self::with_config(GattConfig::default())
    }

    pub fn with_config(config: GattConfig) -> Self {
        Self {
            config,
            services: Vec::new(),
            defs: Vec::new(),
        }
    }

    /// Append a service. The global flat projection becomes stale and is
    /// rebuilt on the next [`svc_defs`](Self::svc_defs) call.
    pub fn add_service(&mut self, service: Rc<RefCell<Service>>) {
        service.borrow_mut().set_log_label(self.config.log_label);
        self.services.push(service);
        self.defs.clear();
    }

    /// Construct a service in place and return the shared handle.
    pub fn emplace_service(&mut self, uuid: Uuid128) -> Rc<RefCell<Service>> {
        let service = Rc::new(RefCell::new(Service::new(uuid)));
        self.add_service(Rc::clone(&service));
        service
    }

    /// Number of registered services.
    pub fn size(&self) -> usize {
        self.services.len()
    }

    /// Rebuild and return the global flat array: every service's
    /// projected elements in insertion order, each service's own sentinel
    /// dropped, one global sentinel appended.
    pub fn svc_defs(&mut self) -> &[SvcDef] {
        self.rebuild();
        &self.defs
    }

    fn rebuild(&mut self) {
        self.defs.clear();
        for service in &self.services {
            let mut service = service.borrow_mut();
            for def in service.svc_defs() {
                if def.is_end() {
                    break;
                }
                self.defs.push(*def);
            }
        }
        self.defs.push(SvcDef::end());
    }

    /// Hand the flat array to the attribute server: count configuration
    /// first, then the commit. Aborts after the first non-zero status and
    /// propagates it verbatim; the second call is not attempted.
    pub fn register(&mut self, host: &mut dyn AttributeServer) -> Result<(), RegisterError> {
        let label = self.config.log_label;
        let svcs = self.svc_defs().as_ptr();

        let rc = host.count_cfg(svcs);
        if rc != 0 {
            error!("{}: failed to count GATT services: {}", label, rc);
            return Err(RegisterError::CountCfg(rc));
        }
        let rc = host.add_svcs(svcs);
        if rc != 0 {
            error!("{}: failed to add GATT services: {}", label, rc);
            return Err(RegisterError::AddSvcs(rc));
        }
        info!("{}: registered {} service(s)", label, self.services.len());
        Ok(())
    }

    /// The 128-bit identifiers of every registered service, for an
    /// advertisement-payload builder. Truncated at [`MAX_ADV_SERVICES`];
    /// payload byte layout is the builder's concern, not this table's.
    pub fn service_uuids(&self) -> heapless::Vec<Uuid128, MAX_ADV_SERVICES> {
        let mut uuids = heapless::Vec::new();
        for service in &self.services {
            if uuids.push(service.borrow().uuid().clone()).is_err() {
                warn!(
                    "{}: advertisement list full, {} of {} service(s) omitted",
                    self.config.log_label,
                    self.services.len() - uuids.len(),
                    self.services.len()
                );
                break;
            }
        }
        uuids
    }

    /// Multi-line diagnostic summary over all services.
    pub fn overview(&self) -> String {
        let mut out = String::from("ServiceTable overview:\n");
        for (idx, service) in self.services.iter().enumerate() {
            let _ = writeln!(out, "Service [{}]:", idx);
            out.push_str(&service.borrow().overview());
            out.push('\n');
        }
        out
    }
}
