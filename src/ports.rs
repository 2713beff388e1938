//! Port traits — the boundary between the definition table and the host
//! attribute-server stack.
//!
//! ```text
//!   host stack ──▶ TransportBuffer ──▶ Characteristic::access (inbound)
//!   ServiceTable ──▶ AttributeServer ──▶ host stack        (outbound)
//! ```
//!
//! The espidf adapter implements both over the NimBLE C API; host-side
//! tests implement them with in-memory mocks. The core never calls the
//! host stack directly.

use crate::raw::SvcDef;

/// Returned by [`TransportBuffer::append`] when the transport cannot
/// buffer the full response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferFull;

/// Per-access transport buffer: the write payload arrives through it and
/// the read response is appended to it.
///
/// `access` runs synchronously inside the host stack's callback context,
/// so implementations must not block.
pub trait TransportBuffer {
    /// Decoded payload of a write access. Empty for reads.
    fn payload(&self) -> &[u8];

    /// Append response bytes for a read access.
    fn append(&mut self, data: &[u8]) -> Result<(), BufferFull>;
}

/// Outbound port: the two-call registration surface of the attribute
/// server. Both calls consume the same sentinel-terminated definition
/// array and return a host status code (0 = success) that is propagated
/// unchanged.
pub trait AttributeServer {
    /// Pre-count attribute resources. Must be called before
    /// [`add_svcs`](Self::add_svcs).
    fn count_cfg(&mut self, svcs: *const SvcDef) -> i32;

    /// Commit the service definitions. During this call the host writes
    /// each characteristic's assigned handle through the `val_handle`
    /// out-pointer embedded in the array.
    fn add_svcs(&mut self, svcs: *const SvcDef) -> i32;
}
