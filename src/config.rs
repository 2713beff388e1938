//! Table configuration parameters
//!
//! Tunables for a [`ServiceTable`](crate::table::ServiceTable) instance.
//! Carried per table rather than as process-wide constants, so two tables
//! in one firmware image can log and advertise independently.

/// Upper bound on 128-bit service identifiers exposed to the
/// advertisement-payload builder.
pub const MAX_ADV_SERVICES: usize = 8;

/// Per-table configuration.
#[derive(Debug, Clone)]
pub struct GattConfig {
    /// Label prefixed to every access and registration log line.
    pub log_label: &'static str,
}

impl Default for GattConfig {
    fn default() -> Self {
        Self { log_label: "gatt" }
    }
}
