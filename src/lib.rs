//! GATT attribute table builder for a NimBLE-style host stack.
//!
//! Applications assemble services and characteristics as owned Rust
//! objects; the crate projects the graph into the flat, sentinel-
//! terminated `#[repr(C)]` arrays the host registration API consumes and
//! routes the host's single raw access callback back to the right
//! characteristic. All host-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; everything else
//! builds and tests on the host.

pub mod characteristic;
pub mod config;
pub mod dispatch;
pub mod ports;
pub mod raw;
pub mod registry;
pub mod service;
pub mod table;
pub mod uuid;

mod error;

// Re-exported so the crate compiles everywhere; the implementation is
// guarded by cfg attributes inside.
pub mod adapters;

pub use characteristic::{AccessOp, AccessPolicy, Characteristic, ReadCallback, WriteCallback};
pub use config::GattConfig;
pub use error::{AccessError, RegisterError};
pub use ports::{AttributeServer, BufferFull, TransportBuffer};
pub use service::Service;
pub use table::ServiceTable;
pub use uuid::{Uuid128, Uuid16};
