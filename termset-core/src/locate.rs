//! Locator - maps a term to its (bucket, offset) coordinates
//!
//! The outer level is searched with a left-to-right linear scan rather than
//! a binary search. Bucket counts stay small (size / bucket length), the
//! scan is cache-friendly over contiguous bucket descriptors, and the hot
//! workloads (deletes near the beginning, appends past the end) resolve
//! after one comparison. Appends are caught by a constant-time check against
//! the overall last term before the scan starts.
//!
//! The inner level is a plain binary search within the owning bucket.

use crate::bucket::Bucket;
use crate::term::Term;
use std::cmp::Ordering;

/// Coordinates of a term within the two-level layout.
///
/// When `found` is false, `bucket_idx`/`offset` are the position at which
/// the term would be inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Index of the owning bucket in the outer sequence.
    pub bucket_idx: usize,
    /// Offset within the owning bucket.
    pub offset: usize,
    /// Whether an equal term is present at the coordinates.
    pub found: bool,
}

/// Find the bucket whose range owns `term`: the first bucket whose last
/// element is greater than or equal to it. Returns `None` for a container
/// with no buckets.
///
/// A term greater than every stored term routes to the final bucket, where
/// insertion lands at the end.
pub(crate) fn owning_bucket(buckets: &[Bucket], term: &Term) -> Option<usize> {
    let last_idx = buckets.len().checked_sub(1)?;

    // Tail check: anything past the overall last term belongs to the final
    // bucket, so monotone appends skip the scan entirely.
    if buckets[last_idx].routing_cmp(term) == Ordering::Less {
        return Some(last_idx);
    }

    for (idx, bucket) in buckets.iter().enumerate() {
        if bucket.routing_cmp(term) != Ordering::Less {
            return Some(idx);
        }
    }

    Some(last_idx)
}

/// Resolve a term to its [`Location`].
///
/// A container with zero buckets, or a single empty bucket, answers
/// `(0, 0, not found)`.
pub fn locate(buckets: &[Bucket], term: &Term) -> Location {
    let Some(bucket_idx) = owning_bucket(buckets, term) else {
        return Location {
            bucket_idx: 0,
            offset: 0,
            found: false,
        };
    };

    match buckets[bucket_idx].find(term) {
        Ok(offset) => Location {
            bucket_idx,
            offset,
            found: true,
        },
        Err(offset) => Location {
            bucket_idx,
            offset,
            found: false,
        },
    }
}
