//! # Termset Bridge
//!
//! Boundary layer exposing `termset-core` containers to a host runtime
//! through opaque handles.
//!
//! This crate provides:
//! - A process-wide, reference-counted handle registry
//! - The locked operation surface (`add`, `remove`, `at`, `slice`, …)
//! - The non-blocking lock discipline: contended operations fail fast with
//!   `LockFail` instead of suspending the caller
//!
//! The core crate stays free of handles, locks, and logging; everything a
//! host runtime needs beyond the data structure itself lives here.
//!
//! ## Example
//!
//! ```
//! use termset_bridge::{ops, registry, RawTerm};
//!
//! let handle = ops::new(1_000, 500);
//! ops::add(handle, RawTerm::int(42)).unwrap();
//! assert_eq!(ops::size(handle).unwrap(), 1);
//! registry::release(handle).unwrap();
//! ```

pub mod error;
pub mod ops;
pub mod registry;

pub use error::{BridgeError, Result};
pub use registry::SetHandle;

// Re-export the core vocabulary boundary callers deal in.
pub use termset_core::{AddResult, RawTerm, RemoveResult, Term};
