//! Admission boundary: host values in, admitted terms out
//!
//! A host runtime decodes its values into [`RawTerm`], a superset of
//! [`Term`] that can also carry the value kinds a sorted set refuses to
//! store: floats (no total order compatible with term equality), and the
//! opaque runtime kinds (references, pids, ports, functions) whose identity
//! is not stable under serialization.
//!
//! [`admit`] converts a `RawTerm` into a [`Term`], rejecting the whole value
//! if any leaf is inadmissible. The check is deep and runs before any
//! container mutation, so a rejected value never changes observable state.

use crate::error::{Error, Result};
use crate::term::Term;
use num_bigint::BigInt;

/// A decoded host value prior to admission.
///
/// Composite variants may transitively contain inadmissible leaves; only
/// [`admit`] decides whether the value as a whole is storable.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTerm {
    /// Arbitrary-precision signed integer.
    Int(BigInt),
    /// Symbolic name.
    Atom(String),
    /// Opaque byte sequence.
    Bytes(Vec<u8>),
    /// Variable-length sequence, possibly containing inadmissible leaves.
    List(Vec<RawTerm>),
    /// Fixed-arity sequence, possibly containing inadmissible leaves.
    Tuple(Vec<RawTerm>),
    /// Floating-point number. Never admitted.
    Float(f64),
    /// Opaque runtime reference. Never admitted.
    Reference,
    /// Process identifier. Never admitted.
    Pid,
    /// Port handle. Never admitted.
    Port,
    /// Function value. Never admitted.
    Function,
}

impl RawTerm {
    /// Construct an integer raw term.
    pub fn int(value: impl Into<BigInt>) -> Self {
        RawTerm::Int(value.into())
    }

    /// Construct an atom raw term.
    pub fn atom(name: impl Into<String>) -> Self {
        RawTerm::Atom(name.into())
    }

    /// Construct a byte-sequence raw term.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RawTerm::Bytes(data.into())
    }

    /// Variant name used in rejection errors.
    pub fn kind(&self) -> &'static str {
        match self {
            RawTerm::Int(_) => "integer",
            RawTerm::Atom(_) => "atom",
            RawTerm::Bytes(_) => "bytes",
            RawTerm::List(_) => "list",
            RawTerm::Tuple(_) => "tuple",
            RawTerm::Float(_) => "float",
            RawTerm::Reference => "reference",
            RawTerm::Pid => "pid",
            RawTerm::Port => "port",
            RawTerm::Function => "function",
        }
    }
}

/// Deep-check a decoded host value and convert it into an admitted [`Term`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] naming the first inadmissible leaf
/// encountered. No partial conversion is observable on failure.
pub fn admit(raw: RawTerm) -> Result<Term> {
    match raw {
        RawTerm::Int(value) => Ok(Term::Int(Box::new(value))),
        RawTerm::Atom(name) => Ok(Term::Atom(name)),
        RawTerm::Bytes(data) => Ok(Term::Bytes(data)),
        RawTerm::List(elements) => Ok(Term::List(admit_all(elements)?)),
        RawTerm::Tuple(elements) => Ok(Term::Tuple(admit_all(elements)?)),
        rejected @ (RawTerm::Float(_)
        | RawTerm::Reference
        | RawTerm::Pid
        | RawTerm::Port
        | RawTerm::Function) => Err(Error::unsupported(rejected.kind())),
    }
}

/// Admit every value in a sequence, failing on the first rejection.
pub fn admit_all(raws: Vec<RawTerm>) -> Result<Vec<Term>> {
    raws.into_iter().map(admit).collect()
}

impl From<Term> for RawTerm {
    fn from(term: Term) -> Self {
        match term {
            Term::Int(value) => RawTerm::Int(*value),
            Term::Atom(name) => RawTerm::Atom(name),
            Term::Bytes(data) => RawTerm::Bytes(data),
            Term::List(elements) => {
                RawTerm::List(elements.into_iter().map(RawTerm::from).collect())
            }
            Term::Tuple(elements) => {
                RawTerm::Tuple(elements.into_iter().map(RawTerm::from).collect())
            }
        }
    }
}

macro_rules! impl_from_int_for_raw_term {
    ($($t:ty),* $(,)?) => {$(
        impl From<$t> for RawTerm {
            fn from(value: $t) -> Self {
                RawTerm::int(value)
            }
        }
    )*};
}
impl_from_int_for_raw_term!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<f64> for RawTerm {
    fn from(value: f64) -> Self {
        RawTerm::Float(value)
    }
}
