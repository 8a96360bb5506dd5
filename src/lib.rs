//! Encoding of structured values in the Erlang external term format.
//!
//! The external term format, also known through its BERT incarnation, is
//! a tag-prefixed binary encoding for structured values used for data
//! exchange between languages. This crate implements the encoding
//! direction: it takes a [`Value`] and produces the octets a compliant
//! peer can decode.
//!
//! Encoding happens in two composable stages. The canonicalization stage,
//! [`canonicalize`], rewrites values without a native tag in the format,
//! that is nil, booleans, maps, regular expressions and timestamps, into
//! tuples of the form `{bert, Kind, ...}`. The primitive stage,
//! [`encode_term`], turns a value consisting only of tagged variants into
//! octets: a version octet followed by the recursive, length-prefixed
//! encoding of the value. The function [`encode`] composes the two and is
//! what most callers want.
//!
//! ```
//! use bert::{encode, Atom};
//!
//! let value = bert::t![Atom::from("user"), 42];
//! let bytes = encode(value).unwrap();
//! assert_eq!(
//!     bytes.to_vec(),
//!     b"\x83\x68\x02\x64\x00\x04user\x61\x2a"
//! );
//! ```
//!
//! Tuples and lists both hold sequences of values but encode differently:
//! a tuple is fixed-arity and carries no terminator, a list is always
//! terminated by the empty-list tag. The distinction is carried on the
//! value itself through the [`Value::Tuple`] and [`Value::List`]
//! variants.
//!
//! Integers of any magnitude are supported. Values within the 28 bit
//! signed range use one of the two fixed-width integer tags; everything
//! beyond that is serialized as a sign octet followed by the
//! little-endian magnitude octets of the number.

pub use self::buf::Buffer;
pub use self::canon::canonicalize;
pub use self::encode::{encode, encode_term, encode_term_into};
pub use self::error::EncodeError;
pub use self::tag::Tag;
pub use self::value::{Atom, RegexOptions, Timestamp, Value};

mod buf;
mod canon;
mod encode;
mod error;
mod tag;
mod value;
