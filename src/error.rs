//! Typed errors for access dispatch and registration.
//!
//! Every variant maps onto the host-defined status code that crosses the
//! C boundary, so failures surface verbatim and no information is lost
//! between the core and the attribute server.

use core::fmt;

use crate::raw;

/// Failure of a single characteristic or descriptor access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The transport could not buffer the full read response.
    InsufficientResources,
    /// The operation code is neither read nor write.
    Unsupported,
}

impl AccessError {
    /// The ATT status code reported back to the host stack.
    pub const fn att_code(self) -> i32 {
        match self {
            Self::InsufficientResources => raw::ATT_ERR_INSUFFICIENT_RES as i32,
            Self::Unsupported => raw::ATT_ERR_UNLIKELY as i32,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientResources => write!(f, "transport buffer exhausted"),
            Self::Unsupported => write!(f, "unsupported access operation"),
        }
    }
}

/// Failure of the two-call registration sequence. The sequence aborts at
/// the first non-zero status; the second call is never attempted after a
/// count-configuration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// The count-configuration call rejected the definition array.
    CountCfg(i32),
    /// The add-services call rejected the definition array.
    AddSvcs(i32),
}

impl RegisterError {
    /// The host status code, propagated unchanged.
    pub const fn code(self) -> i32 {
        match self {
            Self::CountCfg(rc) | Self::AddSvcs(rc) => rc,
        }
    }
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountCfg(rc) => write!(f, "count configuration failed: {rc}"),
            Self::AddSvcs(rc) => write!(f, "add services failed: {rc}"),
        }
    }
}
