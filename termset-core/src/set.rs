//! SortedSet - two-level ordered set with positional access
//!
//! The outer level is a `Vec` of bucket descriptors, the inner level a
//! bounded `Vec<Term>` per bucket. A flat sorted vector pays O(N) element
//! copies per insert as it grows; a balanced tree pays pointer chasing on
//! every probe. Splitting the storage in two bounds each mutation's shift
//! to one bucket and makes outer growth move fixed-size descriptors only.
//!
//! ## Invariants
//!
//! After every completed operation:
//!
//! 1. Concatenating the buckets yields a strictly increasing term sequence.
//! 2. No bucket exceeds the configured maximum length.
//! 3. No bucket is empty, except a sole bucket representing the empty set
//!    (both "no buckets" and "one empty bucket" denote size 0; `new` starts
//!    in the latter state, `empty` in the former).
//! 4. The cached size equals the sum of bucket lengths.
//! 5. Buckets partition the order: every term in bucket `i` is strictly
//!    less than every term in bucket `i + 1`.
//!
//! Emptied buckets are dropped rather than merged with a neighbor; merge
//! churn under delete-heavy workloads costs more than the at-most-2x space
//! it would reclaim.

use std::cmp::min;

use serde::{Deserialize, Serialize};

use crate::bucket::{Bucket, BucketInsert};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::locate::{locate, owning_bucket, Location};
use crate::term::Term;

/// Outcome of [`SortedSet::add`]. Indices are zero-based global positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddResult {
    /// The term was inserted and now sits at this index.
    Added(usize),
    /// An equal term already sits at this index; nothing changed.
    Duplicate(usize),
}

/// Outcome of [`SortedSet::remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveResult {
    /// The term was removed from this index (pre-removal numbering).
    Removed(usize),
    /// No equal term was present; nothing changed.
    NotFound,
}

/// Coordinates of a present term: owning bucket, offset within it, and the
/// global index the two resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoundData {
    /// Index of the owning bucket.
    pub bucket_idx: usize,
    /// Offset within the owning bucket.
    pub inner_idx: usize,
    /// Zero-based global index.
    pub idx: usize,
}

/// In-memory ordered set of [`Term`]s with positional access.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SortedSet {
    configuration: Configuration,
    buckets: Vec<Bucket>,
    size: usize,
}

impl SortedSet {
    /// Create a set with zero buckets, the trusted bulk-load starting state.
    pub fn empty(configuration: Configuration) -> SortedSet {
        let buckets = Vec::with_capacity(configuration.initial_bucket_slots);

        SortedSet {
            configuration,
            buckets,
            size: 0,
        }
    }

    /// Create a set holding one empty bucket, the canonical empty state for
    /// incremental use.
    pub fn new(configuration: Configuration) -> SortedSet {
        let mut result = SortedSet::empty(configuration);
        result.buckets.push(Bucket::default());
        result
    }

    /// Build a set from arbitrary terms: sorts, deduplicates, and loads the
    /// result through the trusted append path in half-capacity buckets,
    /// leaving every bucket room to grow before its first split.
    pub fn from_terms(configuration: Configuration, terms: impl IntoIterator<Item = Term>) -> SortedSet {
        let mut terms: Vec<Term> = terms.into_iter().collect();
        terms.sort_unstable();
        terms.dedup();

        let chunk_len = (configuration.max_bucket_len / 2).max(1);
        let mut result = SortedSet::empty(configuration);

        while !terms.is_empty() {
            let rest = terms.split_off(min(chunk_len, terms.len()));
            result.size += terms.len();
            result.buckets.push(Bucket::from(terms));
            terms = rest;
        }

        result
    }

    /// Total number of stored terms.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check whether the set holds no terms.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Insert a term, reporting the global index it landed at, or the index
    /// of the equal term already present.
    ///
    /// When the owning bucket reaches the maximum length the insert splits
    /// it at the midpoint; the reported index is unaffected (a split never
    /// reorders the concatenation).
    pub fn add(&mut self, term: Term) -> AddResult {
        if self.buckets.is_empty() {
            // A bulk-load-constructed set gains its bucket lazily.
            self.buckets.push(Bucket::default());
        }

        let bucket_idx = owning_bucket(&self.buckets, &term).unwrap_or(0);

        match self.buckets[bucket_idx].insert(term) {
            BucketInsert::Duplicate(offset) => {
                AddResult::Duplicate(self.effective_index(bucket_idx, offset))
            }
            BucketInsert::Inserted(offset) => {
                let effective_idx = self.effective_index(bucket_idx, offset);
                self.size += 1;

                if self.buckets[bucket_idx].len() >= self.configuration.max_bucket_len {
                    let upper = self.buckets[bucket_idx].split_off_upper();
                    self.buckets.insert(bucket_idx + 1, upper);
                }

                AddResult::Added(effective_idx)
            }
        }
    }

    /// Remove a term, reporting the global index it occupied before removal.
    ///
    /// A bucket emptied by the removal is dropped from the outer sequence
    /// unless it is the sole bucket; neighbors are never merged.
    pub fn remove(&mut self, term: &Term) -> RemoveResult {
        let Location {
            bucket_idx,
            offset,
            found,
        } = locate(&self.buckets, term);

        if !found {
            return RemoveResult::NotFound;
        }

        let effective_idx = self.effective_index(bucket_idx, offset);
        self.buckets[bucket_idx].remove_at(offset);
        self.size -= 1;

        if self.buckets.len() > 1 && self.buckets[bucket_idx].is_empty() {
            self.buckets.remove(bucket_idx);
        }

        RemoveResult::Removed(effective_idx)
    }

    /// Term at a zero-based global index, or `None` past the end.
    pub fn at(&self, index: usize) -> Option<&Term> {
        let mut remaining = index;

        for bucket in &self.buckets {
            if remaining < bucket.len() {
                return bucket.at(remaining);
            }
            remaining -= bucket.len();
        }

        None
    }

    /// Up to `amount` consecutive terms starting at global index `start`.
    ///
    /// The result is clamped to the end of the set; a start at or past the
    /// end yields an empty vector. Only terms inside the requested range are
    /// cloned; untouched buckets are never copied.
    pub fn slice(&self, start: usize, amount: usize) -> Vec<Term> {
        if start >= self.size || amount == 0 {
            return Vec::new();
        }

        let take = min(amount, self.size - start);
        let mut result = Vec::with_capacity(take);
        let mut skip = start;

        for bucket in &self.buckets {
            if skip >= bucket.len() {
                // Still seeking the bucket containing the first element.
                skip -= bucket.len();
                continue;
            }

            for term in &bucket.terms[skip..] {
                if result.len() == take {
                    return result;
                }
                result.push(term.clone());
            }
            skip = 0;
        }

        result
    }

    /// Look up a term's coordinates and global index.
    pub fn find_index(&self, term: &Term) -> Option<FoundData> {
        let Location {
            bucket_idx,
            offset,
            found,
        } = locate(&self.buckets, term);

        found.then(|| FoundData {
            bucket_idx,
            inner_idx: offset,
            idx: self.effective_index(bucket_idx, offset),
        })
    }

    /// Iterate the stored terms in order without copying.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.buckets.iter().flat_map(|bucket| bucket.terms.iter())
    }

    /// Clone the stored terms into a single ordered vector.
    pub fn to_vec(&self) -> Vec<Term> {
        let mut result = Vec::with_capacity(self.size);
        for bucket in &self.buckets {
            result.extend(bucket.terms.iter().cloned());
        }
        result
    }

    /// Trusted bulk append of a pre-sorted, deduplicated run of terms that
    /// all sort strictly after the current contents. The run becomes the new
    /// trailing bucket (or fills the sole empty bucket of a `new` set).
    ///
    /// Order and uniqueness against existing contents are **not** validated;
    /// misuse corrupts the container invariants. An empty run is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::MaxBucketLenExceeded`] when `terms.len()` is at or above the
    /// maximum bucket length (the run must be strictly shorter, so the
    /// bucket keeps room to grow before splitting).
    pub fn append_bucket(&mut self, terms: Vec<Term>) -> Result<()> {
        if terms.len() >= self.configuration.max_bucket_len {
            return Err(Error::MaxBucketLenExceeded {
                given: terms.len(),
                max: self.configuration.max_bucket_len,
            });
        }

        if terms.is_empty() {
            return Ok(());
        }

        self.size += terms.len();

        match self.buckets.last_mut() {
            Some(last) if last.is_empty() => *last = Bucket::from(terms),
            _ => self.buckets.push(Bucket::from(terms)),
        }

        Ok(())
    }

    /// Structural rendering of the outer/inner layout, for introspection
    /// only. The format carries no stability guarantee.
    pub fn debug_dump(&self) -> String {
        format!("{:#?}", self)
    }

    /// Global index of a bucket-local offset: the offset plus the lengths of
    /// every bucket to the left.
    fn effective_index(&self, bucket_idx: usize, offset: usize) -> usize {
        let mut result = offset;
        for bucket in &self.buckets[..bucket_idx] {
            result += bucket.len();
        }
        result
    }
}

impl Default for SortedSet {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl FromIterator<Term> for SortedSet {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        SortedSet::from_terms(Configuration::default(), iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn int_set(max_bucket_len: usize, values: impl IntoIterator<Item = i64>) -> SortedSet {
        let mut set = SortedSet::new(Configuration::with_max_bucket_len(max_bucket_len));
        for value in values {
            set.add(Term::int(value));
        }
        set
    }

    fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Term> {
        values.into_iter().map(Term::int).collect()
    }

    /// Assert the container invariants hold for the current state.
    fn check_invariants(set: &SortedSet) {
        let flat = set.to_vec();
        assert!(
            flat.windows(2).all(|pair| pair[0] < pair[1]),
            "concatenation must be strictly increasing"
        );

        let bucket_sum: usize = set.buckets.iter().map(Bucket::len).sum();
        assert_eq!(set.size, bucket_sum, "cached size must match bucket sum");

        for bucket in &set.buckets {
            assert!(
                bucket.len() <= set.configuration.max_bucket_len,
                "bucket exceeds configured maximum"
            );
        }

        let empties = set.buckets.iter().filter(|b| b.is_empty()).count();
        if set.size == 0 {
            assert!(set.buckets.len() <= 1, "empty set is [] or [[]]");
        } else {
            assert_eq!(empties, 0, "non-empty set must have no empty buckets");
        }
    }

    fn bucket_lens(set: &SortedSet) -> Vec<usize> {
        set.buckets.iter().map(Bucket::len).collect()
    }

    #[test]
    fn test_add_sorts_arbitrary_insert_order() {
        let mut set = SortedSet::default();
        let mut expected = Vec::new();

        for i in 0..10_000i64 {
            let value = (i * 7919) % 10_000;
            expected.push(Term::bytes(format!("item-{value:05}")));
            set.add(Term::bytes(format!("item-{value:05}")));
        }
        expected.sort();
        expected.dedup();

        assert_eq!(set.to_vec(), expected);
        check_invariants(&set);
    }

    #[test]
    fn test_add_reports_global_index() {
        let mut set = int_set(5, []);

        assert_eq!(set.add(Term::int(10)), AddResult::Added(0));
        assert_eq!(set.add(Term::int(30)), AddResult::Added(1));
        assert_eq!(set.add(Term::int(20)), AddResult::Added(1));
        assert_eq!(set.add(Term::int(5)), AddResult::Added(0));

        assert_eq!(set.to_vec(), ints([5, 10, 20, 30]));
    }

    #[test]
    fn test_add_duplicate_reports_existing_index() {
        let mut set = SortedSet::default();
        assert_eq!(set.size(), 0);

        assert_eq!(set.add(Term::bytes("test-item")), AddResult::Added(0));
        assert_eq!(set.size(), 1);

        assert_eq!(set.add(Term::bytes("test-item")), AddResult::Duplicate(0));
        assert_eq!(set.size(), 1);
        check_invariants(&set);
    }

    #[test]
    fn test_add_on_bulk_constructed_set_creates_first_bucket() {
        let mut set = SortedSet::empty(Configuration::with_max_bucket_len(5));

        assert_eq!(set.add(Term::int(1)), AddResult::Added(0));
        assert_eq!(set.to_vec(), ints([1]));
        check_invariants(&set);
    }

    #[test]
    fn test_split_layout_from_sequential_adds() {
        // Bucket length 5: the set settles into the shape the locator tests
        // assume.
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(bucket_lens(&set), vec![2, 2, 2, 3]);
        assert_eq!(set.to_vec(), ints([2, 4, 6, 8, 10, 12, 14, 16, 18]));
        check_invariants(&set);
    }

    #[test]
    fn test_split_preserves_reported_index() {
        let mut set = int_set(2, []);

        // Every add with bucket length 2 lands in a bucket that immediately
        // splits; the reported index must describe the final layout.
        assert_eq!(set.add(Term::int(1)), AddResult::Added(0));
        assert_eq!(set.add(Term::int(3)), AddResult::Added(1));
        assert_eq!(set.add(Term::int(2)), AddResult::Added(1));
        assert_eq!(set.add(Term::int(0)), AddResult::Added(0));

        assert_eq!(set.to_vec(), ints([0, 1, 2, 3]));
        check_invariants(&set);
    }

    #[test]
    fn test_remove_reports_pre_removal_index() {
        let mut set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(set.remove(&Term::int(10)), RemoveResult::Removed(4));
        assert_eq!(set.to_vec(), ints([2, 4, 6, 8, 12, 14, 16, 18]));
        assert_eq!(set.size(), 8);
        check_invariants(&set);
    }

    #[test]
    fn test_remove_missing_term_is_a_noop() {
        let mut set = int_set(5, [2, 4, 6]);
        let before = set.to_vec();

        assert_eq!(set.remove(&Term::int(5)), RemoveResult::NotFound);
        assert_eq!(set.to_vec(), before);
        assert_eq!(set.size(), 3);
    }

    #[test]
    fn test_remove_drops_emptied_bucket() {
        let mut set = int_set(2, [1, 2, 3, 4, 5, 6]);

        // Drain one bucket completely; the outer sequence must shrink and
        // later indices renumber.
        for value in [1, 2, 3, 4, 5] {
            assert_eq!(set.remove(&Term::int(value)), RemoveResult::Removed(0));
            check_invariants(&set);
        }

        assert_eq!(set.to_vec(), ints([6]));
    }

    #[test]
    fn test_remove_last_term_keeps_sole_empty_bucket() {
        let mut set = int_set(5, [7]);

        assert_eq!(set.remove(&Term::int(7)), RemoveResult::Removed(0));
        assert_eq!(set.size(), 0);
        assert_eq!(set.buckets.len(), 1);
        check_invariants(&set);

        // The emptied set must accept new terms again.
        assert_eq!(set.add(Term::int(9)), AddResult::Added(0));
        check_invariants(&set);
    }

    #[test]
    fn test_remove_on_empty_states() {
        let mut fresh = SortedSet::new(Configuration::default());
        assert_eq!(fresh.remove(&Term::int(1)), RemoveResult::NotFound);

        let mut bulk = SortedSet::empty(Configuration::default());
        assert_eq!(bulk.remove(&Term::int(1)), RemoveResult::NotFound);
    }

    #[test]
    fn test_at_walks_buckets() {
        let set = int_set(3, [10, 20, 30, 40, 50]);

        for (idx, value) in [10, 20, 30, 40, 50].iter().enumerate() {
            assert_eq!(set.at(idx), Some(&Term::int(*value)));
        }
        assert_eq!(set.at(5), None);
    }

    #[test]
    fn test_at_on_empty_states() {
        assert_eq!(SortedSet::new(Configuration::default()).at(0), None);
        assert_eq!(SortedSet::empty(Configuration::default()).at(0), None);
    }

    #[test]
    fn test_slice_within_one_bucket() {
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(set.slice(1, 1), ints([4]));
    }

    #[test]
    fn test_slice_spanning_buckets() {
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(set.slice(1, 4), ints([4, 6, 8, 10]));
        assert_eq!(set.slice(3, 6), ints([8, 10, 12, 14, 16, 18]));
    }

    #[test]
    fn test_slice_clamps_to_end() {
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(set.slice(3, 10), ints([8, 10, 12, 14, 16, 18]));
        assert_eq!(set.slice(7, 10), ints([16, 18]));
    }

    #[test]
    fn test_slice_degenerate_requests() {
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(set.slice(0, 0), Vec::<Term>::new());
        assert_eq!(set.slice(15, 15), Vec::<Term>::new());
        assert_eq!(set.slice(9, 1), Vec::<Term>::new());

        assert_eq!(
            SortedSet::empty(Configuration::default()).slice(0, 100),
            Vec::<Term>::new()
        );
        assert_eq!(
            SortedSet::new(Configuration::default()).slice(0, 100),
            Vec::<Term>::new()
        );
    }

    #[test]
    fn test_find_index_coordinates() {
        let set = int_set(5, (1..10).map(|i| i * 2));

        assert_eq!(
            set.find_index(&Term::int(12)),
            Some(FoundData {
                bucket_idx: 2,
                inner_idx: 1,
                idx: 5,
            })
        );
        assert_eq!(set.find_index(&Term::int(13)), None);
    }

    #[test]
    fn test_find_index_at_roundtrip() {
        let set = int_set(3, [5, 1, 9, 3, 7, 11, 13]);

        for term in set.to_vec() {
            let found = set.find_index(&term).expect("stored term must resolve");
            assert_eq!(set.at(found.idx), Some(&term));
        }
    }

    #[test]
    fn test_append_bucket_fast_path() {
        let mut set = SortedSet::empty(Configuration::with_max_bucket_len(5));

        set.append_bucket(ints([2, 4])).unwrap();
        set.append_bucket(ints([6, 8])).unwrap();
        set.append_bucket(ints([10, 12])).unwrap();
        set.append_bucket(ints([14, 16, 18])).unwrap();

        assert_eq!(set.size(), 9);
        assert_eq!(bucket_lens(&set), vec![2, 2, 2, 3]);
        assert_eq!(set.to_vec(), ints([2, 4, 6, 8, 10, 12, 14, 16, 18]));
        check_invariants(&set);
    }

    #[test]
    fn test_append_bucket_fills_sole_empty_bucket() {
        let mut set = SortedSet::new(Configuration::with_max_bucket_len(5));

        set.append_bucket(ints([1, 2, 3])).unwrap();

        assert_eq!(bucket_lens(&set), vec![3]);
        check_invariants(&set);
    }

    #[test]
    fn test_append_bucket_rejects_full_length_run() {
        let mut set = SortedSet::empty(Configuration::with_max_bucket_len(3));

        // The run must be strictly shorter than the maximum bucket length.
        assert_eq!(
            set.append_bucket(ints([1, 2, 3])),
            Err(Error::MaxBucketLenExceeded { given: 3, max: 3 })
        );
        assert_eq!(set.size(), 0);

        set.append_bucket(ints([1, 2])).unwrap();
        check_invariants(&set);
    }

    #[test]
    fn test_append_bucket_empty_run_is_a_noop() {
        let mut set = SortedSet::new(Configuration::with_max_bucket_len(5));
        set.append_bucket(ints([1, 2])).unwrap();

        set.append_bucket(Vec::new()).unwrap();

        assert_eq!(set.size(), 2);
        assert_eq!(bucket_lens(&set), vec![2]);
        check_invariants(&set);
    }

    #[test]
    fn test_from_terms_matches_incremental_adds() {
        let values = [9i64, 1, 5, 3, 5, 7, 1, 11];
        let config = Configuration::with_max_bucket_len(4);

        let bulk = SortedSet::from_terms(config, values.iter().map(|&v| Term::int(v)));
        let mut incremental = SortedSet::new(config);
        for &value in &values {
            incremental.add(Term::int(value));
        }

        assert_eq!(bulk.to_vec(), incremental.to_vec());
        assert_eq!(bulk.size(), incremental.size());
        check_invariants(&bulk);
    }

    #[test]
    fn test_from_terms_chunks_at_half_capacity() {
        let set = SortedSet::from_terms(
            Configuration::with_max_bucket_len(4),
            (0..7).map(Term::int),
        );

        assert_eq!(bucket_lens(&set), vec![2, 2, 2, 1]);
        check_invariants(&set);
    }

    #[test]
    fn test_from_iterator_uses_default_configuration() {
        let set: SortedSet = (0..5).rev().map(Term::int).collect();
        assert_eq!(set.to_vec(), ints([0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_iter_matches_to_vec() {
        let set = int_set(3, [4, 2, 8, 6]);
        let iterated: Vec<Term> = set.iter().cloned().collect();
        assert_eq!(iterated, set.to_vec());
    }

    #[test]
    fn test_add_remove_restores_previous_state() {
        let mut set = int_set(3, [2, 4, 6, 8, 10]);
        let before = set.to_vec();

        assert_eq!(set.add(Term::int(5)), AddResult::Added(2));
        assert_eq!(set.remove(&Term::int(5)), RemoveResult::Removed(2));

        assert_eq!(set.to_vec(), before);
        assert_eq!(set.size(), 5);
        check_invariants(&set);
    }

    #[test]
    fn test_mixed_variant_contents() {
        let mut set = int_set(2, []);
        set.add(Term::atom("zeta"));
        set.add(Term::bytes("a"));
        set.add(Term::int(100));
        set.add(Term::tuple(vec![Term::int(1)]));
        set.add(Term::list(vec![Term::int(1)]));
        set.add(Term::atom("alpha"));

        assert_eq!(
            set.to_vec(),
            vec![
                Term::int(100),
                Term::atom("alpha"),
                Term::atom("zeta"),
                Term::bytes("a"),
                Term::list(vec![Term::int(1)]),
                Term::tuple(vec![Term::int(1)]),
            ]
        );
        check_invariants(&set);
    }

    #[test]
    fn test_debug_dump_mentions_layout() {
        let set = int_set(2, [1, 2, 3]);
        let dump = set.debug_dump();

        assert!(dump.contains("SortedSet"));
        assert!(dump.contains("buckets"));
    }
}
