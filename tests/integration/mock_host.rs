//! In-memory stand-ins for the host-stack ports.

use gatt_table::raw::SvcDef;
use gatt_table::{AttributeServer, BufferFull, TransportBuffer};

/// Attribute server that records the flat arrays it is handed and can be
/// programmed to fail either registration call.
pub struct MockAttributeServer {
    pub count_cfg_calls: Vec<*const SvcDef>,
    pub add_svcs_calls: Vec<*const SvcDef>,
    pub count_cfg_status: i32,
    pub add_svcs_status: i32,
    /// Opaque dispatch arguments captured from every non-sentinel
    /// characteristic slot at commit time, in walk order.
    pub captured_args: Vec<*mut core::ffi::c_void>,
}

impl MockAttributeServer {
    pub fn new() -> Self {
        Self {
            count_cfg_calls: Vec::new(),
            add_svcs_calls: Vec::new(),
            count_cfg_status: 0,
            add_svcs_status: 0,
            captured_args: Vec::new(),
        }
    }

    /// Walk a sentinel-terminated service array the way the real host
    /// does, counting services and characteristics.
    pub fn walk(svcs: *const SvcDef) -> (usize, usize) {
        let mut services = 0;
        let mut characteristics = 0;
        unsafe {
            let mut svc = svcs;
            while !(*svc).is_end() {
                services += 1;
                let mut chr = (*svc).characteristics;
                if !chr.is_null() {
                    while !(*chr).is_end() {
                        characteristics += 1;
                        chr = chr.add(1);
                    }
                }
                svc = svc.add(1);
            }
        }
        (services, characteristics)
    }
}

impl AttributeServer for MockAttributeServer {
    fn count_cfg(&mut self, svcs: *const SvcDef) -> i32 {
        self.count_cfg_calls.push(svcs);
        self.count_cfg_status
    }

    fn add_svcs(&mut self, svcs: *const SvcDef) -> i32 {
        self.add_svcs_calls.push(svcs);
        if self.add_svcs_status == 0 {
            // Commit: capture every opaque argument like the host would.
            unsafe {
                let mut svc = svcs;
                while !(*svc).is_end() {
                    let mut chr = (*svc).characteristics;
                    if !chr.is_null() {
                        while !(*chr).is_end() {
                            self.captured_args.push((*chr).arg);
                            chr = chr.add(1);
                        }
                    }
                    svc = svc.add(1);
                }
            }
        }
        self.add_svcs_status
    }
}

/// Transport buffer backed by plain vectors: `payload` is what a write
/// carries in, `out` collects what a read appends.
pub struct MockTransport {
    pub payload: Vec<u8>,
    pub out: Vec<u8>,
    pub capacity: usize,
}

impl MockTransport {
    pub fn empty() -> Self {
        Self {
            payload: Vec::new(),
            out: Vec::new(),
            capacity: usize::MAX,
        }
    }

    pub fn carrying(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            out: Vec::new(),
            capacity: usize::MAX,
        }
    }
}

impl TransportBuffer for MockTransport {
    fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn append(&mut self, data: &[u8]) -> Result<(), BufferFull> {
        if self.out.len() + data.len() > self.capacity {
            return Err(BufferFull);
        }
        self.out.extend_from_slice(data);
        Ok(())
    }
}
