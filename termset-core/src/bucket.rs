//! Bucket - a bounded, ordered, duplicate-free run of terms
//!
//! Buckets are the inner level of the two-level container. Each one owns a
//! strictly increasing `Vec<Term>` whose length the container keeps at or
//! below the configured maximum; lookups are binary searches and mutations
//! shift at most one bucket's worth of elements.

use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of a bucket-local insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketInsert {
    /// The term was inserted at this offset.
    Inserted(usize),
    /// An equal term already sits at this offset; nothing changed.
    Duplicate(usize),
}

/// Ordered, duplicate-free run of terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub(crate) terms: Vec<Term>,
}

impl Bucket {
    /// Number of terms in the bucket.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the bucket holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term at a bucket-local offset.
    pub fn at(&self, offset: usize) -> Option<&Term> {
        self.terms.get(offset)
    }

    /// Smallest term in the bucket.
    pub fn first(&self) -> Option<&Term> {
        self.terms.first()
    }

    /// Largest term in the bucket.
    pub fn last(&self) -> Option<&Term> {
        self.terms.last()
    }

    /// Binary-search for a term. `Ok` carries the offset of an equal term,
    /// `Err` the offset at which it would be inserted.
    pub fn find(&self, term: &Term) -> std::result::Result<usize, usize> {
        self.terms.binary_search(term)
    }

    /// Insert a term at its sorted position, refusing duplicates.
    pub fn insert(&mut self, term: Term) -> BucketInsert {
        match self.find(&term) {
            Ok(offset) => BucketInsert::Duplicate(offset),
            Err(offset) => {
                self.terms.insert(offset, term);
                BucketInsert::Inserted(offset)
            }
        }
    }

    /// Remove a term, reporting the offset it occupied.
    pub fn remove(&mut self, term: &Term) -> Option<usize> {
        match self.find(term) {
            Ok(offset) => {
                self.terms.remove(offset);
                Some(offset)
            }
            Err(_) => None,
        }
    }

    /// Remove the term at a known offset. Caller guarantees bounds.
    pub(crate) fn remove_at(&mut self, offset: usize) -> Term {
        self.terms.remove(offset)
    }

    /// Split off the upper half at the midpoint, leaving the lower half in
    /// place. For an odd length the extra term goes to the returned bucket.
    pub fn split_off_upper(&mut self) -> Bucket {
        let mid = self.terms.len() / 2;
        Bucket {
            terms: self.terms.split_off(mid),
        }
    }

    /// Compare this bucket's covered range against a term, for outer routing.
    ///
    /// Returns `Greater` when the whole bucket sorts after the term, `Less`
    /// when it sorts before, and `Equal` when the term falls within
    /// `[first, last]`. An empty bucket answers `Equal`: it can only be the
    /// sole bucket of an empty set, where every term routes to it.
    pub fn routing_cmp(&self, term: &Term) -> Ordering {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Ordering::Equal;
        };

        if term < first {
            Ordering::Greater
        } else if last < term {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

impl From<Vec<Term>> for Bucket {
    fn from(terms: Vec<Term>) -> Self {
        Bucket { terms }
    }
}
