//! Error types for the bridge boundary

use thiserror::Error;

/// Result type alias using our BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors surfaced to boundary callers
///
/// Every failure is reported to the caller; nothing is retried or logged
/// away internally. `LockFail` is the only transient kind; callers that
/// need blocking semantics retry it themselves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The handle does not resolve to a live container
    #[error("Bad reference: handle does not resolve to a live set")]
    BadReference,

    /// The container's lock was contended; the operation did not execute
    #[error("Lock contended: operation did not execute")]
    LockFail,

    /// Term admission or bulk-append failure from the core
    #[error(transparent)]
    Core(#[from] termset_core::Error),
}

impl BridgeError {
    /// Check if this failure is transient and worth retrying
    ///
    /// Only lock contention qualifies: the operation had no effect and an
    /// immediate retry can succeed. Everything else is deterministic:
    /// retrying with the same arguments fails the same way.
    pub fn is_transient(&self) -> bool {
        matches!(self, BridgeError::LockFail)
    }
}
