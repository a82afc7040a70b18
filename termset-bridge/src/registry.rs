//! Process-wide registry of live sorted-set containers
//!
//! External consumers never hold container pointers; they hold a
//! [`SetHandle`], an opaque identifier minted by this registry. Each entry
//! pairs the container (behind its single exclusive lock) with an external
//! reference count.
//!
//! ## Invariants
//!
//! - Handle ids are assigned monotonically and never reused within a
//!   process, so a stale handle can only miss; it cannot alias a younger
//!   container.
//! - An entry is dropped exactly when its reference count reaches zero; an
//!   operation still in flight keeps the container alive through its own
//!   `Arc` until it returns.
//! - Resolution of a dead or foreign handle is an error, never undefined
//!   behavior.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use termset_core::SortedSet;

use crate::error::{BridgeError, Result};

/// Opaque, process-wide identifier for a registered container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SetHandle(u64);

impl SetHandle {
    /// Numeric form of the handle, for logging and diagnostics only.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A registered container behind its exclusive lock.
pub(crate) struct SetResource {
    pub(crate) set: Mutex<SortedSet>,
}

struct Entry {
    resource: Arc<SetResource>,
    refs: usize,
}

struct Registry {
    entries: RwLock<HashMap<u64, Entry>>,
    next_id: AtomicU64,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry {
    entries: RwLock::new(HashMap::new()),
    next_id: AtomicU64::new(1),
});

/// Register a container and mint its first external handle (count 1).
pub fn register(set: SortedSet) -> SetHandle {
    let id = REGISTRY.next_id.fetch_add(1, Ordering::Relaxed);
    let entry = Entry {
        resource: Arc::new(SetResource {
            set: Mutex::new(set),
        }),
        refs: 1,
    };
    REGISTRY.entries.write().insert(id, entry);
    tracing::debug!(handle = id, "registered sorted set");
    SetHandle(id)
}

/// Add an external reference to a live handle.
///
/// The host runtime calls this when it duplicates a handle (one reference
/// per host-side owner).
pub fn retain(handle: SetHandle) -> Result<()> {
    let mut entries = REGISTRY.entries.write();
    let entry = entries
        .get_mut(&handle.0)
        .ok_or(BridgeError::BadReference)?;
    entry.refs += 1;
    Ok(())
}

/// Drop an external reference, deallocating the container at zero.
///
/// The host runtime's finalizer calls this once per dropped owner.
pub fn release(handle: SetHandle) -> Result<()> {
    let mut entries = REGISTRY.entries.write();
    let entry = entries
        .get_mut(&handle.0)
        .ok_or(BridgeError::BadReference)?;
    entry.refs -= 1;

    if entry.refs == 0 {
        entries.remove(&handle.0);
        tracing::debug!(handle = handle.0, "released sorted set");
    }
    Ok(())
}

/// Resolve a handle to its container, holding the registry lock only for
/// the lookup. The returned `Arc` keeps the container alive for the
/// duration of the operation even if the last handle is released meanwhile.
pub(crate) fn resolve(handle: SetHandle) -> Result<Arc<SetResource>> {
    REGISTRY
        .entries
        .read()
        .get(&handle.0)
        .map(|entry| Arc::clone(&entry.resource))
        .ok_or(BridgeError::BadReference)
}

/// Number of live registered containers.
pub fn live_count() -> usize {
    REGISTRY.entries.read().len()
}
