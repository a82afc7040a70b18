//! Boundary operation surface
//!
//! Every operation follows the same protocol, in order: resolve the handle
//! (`BadReference` on a miss), admit any term arguments (`UnsupportedType`
//! rejects before any mutation), then try-acquire the container's exclusive
//! lock. Contention returns `LockFail` immediately: the hosting runtime
//! budgets operation latency and cannot be suspended here, so blocking is
//! the caller's decision, made by retrying.
//!
//! Operations that acquire the lock are linearizable; a `LockFail` leaves
//! no observable effect.

use parking_lot::MutexGuard;
use termset_core::{
    admit, admit_all, AddResult, Configuration, RawTerm, RemoveResult, SortedSet, Term,
};

use crate::error::{BridgeError, Result};
use crate::registry::{self, SetHandle, SetResource};

/// Create a container seeded with one empty bucket and mint its handle.
///
/// `initial_capacity` sizes the outer preallocation in items;
/// `bucket_len` below the supported minimum is clamped up.
pub fn new(initial_capacity: usize, bucket_len: usize) -> SetHandle {
    let configuration = Configuration::for_capacity(initial_capacity, bucket_len);
    registry::register(SortedSet::new(configuration))
}

/// Create a zero-bucket container for trusted bulk loading and mint its
/// handle.
pub fn empty(initial_capacity: usize, bucket_len: usize) -> SetHandle {
    let configuration = Configuration::for_capacity(initial_capacity, bucket_len);
    registry::register(SortedSet::empty(configuration))
}

/// Trusted bulk append of a pre-sorted run (see
/// [`SortedSet::append_bucket`]).
pub fn append_bucket(handle: SetHandle, terms: Vec<RawTerm>) -> Result<()> {
    let resource = registry::resolve(handle)?;
    let terms = admit_all(terms)?;
    let mut set = try_lock(handle, &resource)?;
    Ok(set.append_bucket(terms)?)
}

/// Insert a term, reporting the global index it landed at or already
/// occupied.
pub fn add(handle: SetHandle, term: RawTerm) -> Result<AddResult> {
    let resource = registry::resolve(handle)?;
    let term = admit(term)?;
    let mut set = try_lock(handle, &resource)?;
    Ok(set.add(term))
}

/// Remove a term, reporting the global index it occupied.
pub fn remove(handle: SetHandle, term: RawTerm) -> Result<RemoveResult> {
    let resource = registry::resolve(handle)?;
    let term = admit(term)?;
    let mut set = try_lock(handle, &resource)?;
    Ok(set.remove(&term))
}

/// Number of stored terms.
pub fn size(handle: SetHandle) -> Result<usize> {
    let resource = registry::resolve(handle)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.size())
}

/// Term at a zero-based global index; `None` past the end.
pub fn at(handle: SetHandle, index: usize) -> Result<Option<Term>> {
    let resource = registry::resolve(handle)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.at(index).cloned())
}

/// Up to `amount` consecutive terms starting at `start`, clamped to the
/// end of the set.
pub fn slice(handle: SetHandle, start: usize, amount: usize) -> Result<Vec<Term>> {
    let resource = registry::resolve(handle)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.slice(start, amount))
}

/// Global index of a term; `None` when absent.
pub fn find_index(handle: SetHandle, term: RawTerm) -> Result<Option<usize>> {
    let resource = registry::resolve(handle)?;
    let term = admit(term)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.find_index(&term).map(|found| found.idx))
}

/// Every stored term in order.
pub fn to_list(handle: SetHandle) -> Result<Vec<Term>> {
    let resource = registry::resolve(handle)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.to_vec())
}

/// Structural rendering of the container layout, for introspection only.
pub fn debug(handle: SetHandle) -> Result<String> {
    let resource = registry::resolve(handle)?;
    let set = try_lock(handle, &resource)?;
    Ok(set.debug_dump())
}

/// Non-blocking lock acquisition; contention is reported, never waited out.
fn try_lock<'a>(
    handle: SetHandle,
    resource: &'a SetResource,
) -> Result<MutexGuard<'a, SortedSet>> {
    match resource.set.try_lock() {
        Some(guard) => Ok(guard),
        None => {
            tracing::debug!(handle = handle.raw(), "lock contended");
            Err(BridgeError::LockFail)
        }
    }
}
