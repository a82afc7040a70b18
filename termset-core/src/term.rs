//! Term - the heterogeneous element type stored in a sorted set
//!
//! A `Term` is one of five variants: arbitrary-precision integers, atoms
//! (symbolic names), opaque byte sequences, lists, and tuples. The variant
//! set is closed; values a host runtime cannot safely store (floats,
//! references, pids, ports, functions) never reach this type; they are
//! rejected during admission (see the `admit` module).
//!
//! ## Ordering
//!
//! `Term` implements strict total ordering. Across variants the rank is
//! fixed:
//!
//! ```text
//! Int < Atom < Bytes < List < Tuple
//! ```
//!
//! Within a variant:
//! - integers compare numerically,
//! - atoms compare lexicographically by name,
//! - byte sequences compare lexicographically, shorter prefix first,
//! - lists and tuples compare element-wise, with the shorter operand
//!   winning only on a full prefix tie.
//!
//! Equality is the induced `cmp == Equal`; no two distinct values compare
//! equal, which is what makes binary search over sorted runs sound.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single admitted value stored in a sorted set.
///
/// Composite variants own their children; cloning a deep term clones the
/// whole tree. The integer payload is boxed to keep the enum payload small
/// (a `BigInt` is three words; the other variants are at most three words
/// inline).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// Arbitrary-precision signed integer.
    Int(Box<BigInt>),
    /// Symbolic name; identity is the name itself.
    Atom(String),
    /// Opaque byte sequence. Covers character strings and byte-arrays
    /// uniformly; comparison is byte-wise, not collation-aware.
    Bytes(Vec<u8>),
    /// Variable-length ordered sequence of terms.
    List(Vec<Term>),
    /// Fixed-arity heterogeneous sequence of terms.
    Tuple(Vec<Term>),
}

impl Term {
    /// Construct an integer term.
    pub fn int(value: impl Into<BigInt>) -> Self {
        Term::Int(Box::new(value.into()))
    }

    /// Construct an atom term.
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Construct a byte-sequence term. Accepts both `&str` and byte input;
    /// text is stored as its UTF-8 bytes.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Term::Bytes(data.into())
    }

    /// Construct a list term.
    pub fn list(elements: impl Into<Vec<Term>>) -> Self {
        Term::List(elements.into())
    }

    /// Construct a tuple term.
    pub fn tuple(elements: impl Into<Vec<Term>>) -> Self {
        Term::Tuple(elements.into())
    }

    /// Check if this is an integer term.
    pub fn is_int(&self) -> bool {
        matches!(self, Term::Int(_))
    }

    /// Check if this is a composite term (list or tuple).
    pub fn is_composite(&self) -> bool {
        matches!(self, Term::List(_) | Term::Tuple(_))
    }

    /// Try to get as an integer reference.
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Term::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as an atom name.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            _ => None,
        }
    }

    /// Try to get as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Term::Bytes(data) => Some(data),
            _ => None,
        }
    }

    /// Try to get the elements of a list or tuple.
    pub fn as_elements(&self) -> Option<&[Term]> {
        match self {
            Term::List(elements) | Term::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Variant rank for cross-variant ordering.
    ///
    /// Lower rank sorts earlier. Within a rank, values compare by payload.
    fn type_rank(&self) -> u8 {
        match self {
            Term::Int(_) => 0,
            Term::Atom(_) => 1,
            Term::Bytes(_) => 2,
            Term::List(_) => 3,
            Term::Tuple(_) => 4,
        }
    }
}

// === Strict Total Ordering ===

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Term::Int(a), Term::Int(b)) => a.cmp(b),
            (Term::Atom(a), Term::Atom(b)) => a.cmp(b),
            // Slice ordering is lexicographic with the shorter operand first
            // on a prefix tie, which is exactly the byte-sequence rule.
            (Term::Bytes(a), Term::Bytes(b)) => a.cmp(b),
            // Lists and tuples share the element-wise rule; arity only breaks
            // a full prefix tie. The recursion bottoms out at scalar leaves.
            (Term::List(a), Term::List(b)) => a.cmp(b),
            (Term::Tuple(a), Term::Tuple(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_int_for_term {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for Term {
            fn from(value: $t) -> Self {
                Term::int(value)
            }
        }
    )*};
}
impl_from_int_for_term!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<BigInt> for Term {
    fn from(value: BigInt) -> Self {
        Term::Int(Box::new(value))
    }
}
