//! Container tuning parameters
//!
//! Exactly two knobs, both fixed at construction: the maximum bucket length
//! and the preallocated number of outer bucket slots. Larger buckets reduce
//! outer-scan cost and bucket count; smaller buckets reduce the in-bucket
//! shift cost of each mutation.

use serde::{Deserialize, Serialize};

/// Default maximum bucket length.
pub const DEFAULT_MAX_BUCKET_LEN: usize = 500;

/// Smallest usable bucket length. Below this a bucket could not be split
/// into two non-empty halves; requested values are clamped up to it.
pub const MIN_BUCKET_LEN: usize = 2;

/// Tuning parameters for a sorted set, immutable after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Length at which a bucket is split. Always at least [`MIN_BUCKET_LEN`].
    pub max_bucket_len: usize,

    /// Number of outer bucket slots to preallocate. This sizes the outer
    /// vector only; it is not a bound on the number of stored terms.
    pub initial_bucket_slots: usize,
}

impl Configuration {
    /// Derive a configuration from an expected item capacity and a bucket
    /// length, the shape external callers configure in.
    ///
    /// `bucket_len` is clamped up to [`MIN_BUCKET_LEN`]. The outer vector is
    /// sized to hold `initial_capacity` items at full buckets, plus one slot
    /// of slack for a trailing partial bucket.
    pub fn for_capacity(initial_capacity: usize, bucket_len: usize) -> Self {
        let max_bucket_len = bucket_len.max(MIN_BUCKET_LEN);
        Self {
            max_bucket_len,
            initial_bucket_slots: initial_capacity / max_bucket_len + 1,
        }
    }

    /// Configuration with a specific bucket length and no outer preallocation.
    pub fn with_max_bucket_len(bucket_len: usize) -> Self {
        Self {
            max_bucket_len: bucket_len.max(MIN_BUCKET_LEN),
            initial_bucket_slots: 0,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::for_capacity(DEFAULT_MAX_BUCKET_LEN, DEFAULT_MAX_BUCKET_LEN)
    }
}
