//! # Termset Core
//!
//! In-memory, ordered, unique collection of heterogeneous terms, optimized
//! for membership tests, ordered iteration, positional access, and
//! incremental mutation at hundreds of thousands to millions of elements.
//!
//! This crate provides:
//! - Core types: [`Term`], [`RawTerm`], [`Bucket`], [`SortedSet`]
//! - The fixed total order over the term universe
//! - The admission boundary rejecting unsupported value kinds
//! - Positional index computation over the two-level bucket layout
//!
//! ## Design Principles
//!
//! 1. **Runtime-agnostic**: no locking, no handles, no logging; those live
//!    in `termset-bridge`
//! 2. **Strict total ordering**: every operation relies on `Term`'s total
//!    order; no incomparable pairs exist after admission
//! 3. **Bounded mutation cost**: inserts and removals shift at most one
//!    bucket; the outer vector only ever moves bucket descriptors
//!
//! ## Example
//!
//! ```
//! use termset_core::{Configuration, SortedSet, Term, AddResult};
//!
//! let mut set = SortedSet::new(Configuration::default());
//! assert_eq!(set.add(Term::int(3)), AddResult::Added(0));
//! assert_eq!(set.add(Term::int(1)), AddResult::Added(0));
//! assert_eq!(set.add(Term::atom("a")), AddResult::Added(2));
//! assert_eq!(set.to_vec(), vec![Term::int(1), Term::int(3), Term::atom("a")]);
//! ```

pub mod admit;
pub mod bucket;
pub mod config;
pub mod error;
pub mod locate;
pub mod set;
pub mod term;

// Re-export main types
pub use admit::{admit, admit_all, RawTerm};
pub use bucket::{Bucket, BucketInsert};
pub use config::{Configuration, DEFAULT_MAX_BUCKET_LEN, MIN_BUCKET_LEN};
pub use error::{Error, Result};
pub use locate::{locate, Location};
pub use set::{AddResult, FoundData, RemoveResult, SortedSet};
pub use term::Term;
