//! The values that can be encoded.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.
//!
//! The encodable universe is a closed set of variants captured by
//! [`Value`]. Dispatch over it is exhaustive everywhere; there is no
//! fallback encoding for anything outside the set. The extended variants
//! at the end of the enum have no tag of their own in the wire format and
//! only become encodable after [`canonicalize`][crate::canonicalize] has
//! rewritten them into tagged tuples.

use std::convert::TryFrom;
use std::fmt;
use bytes::Bytes;
use num_bigint::BigInt;


//------------ Atom ----------------------------------------------------------

/// A symbolic name.
///
/// Atoms appear on the wire as a length-prefixed name. The type keeps the
/// raw name octets and places no restriction on them other than the name
/// having to fit its 16 bit length field, which is checked during
/// encoding.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Atom(Bytes);

/// # Well-known Atoms
///
/// The canonical tuple convention spells out extended values using these
/// atoms.
impl Atom {
    /// The atom leading every canonical tuple.
    pub const BERT: Self = Atom(Bytes::from_static(b"bert"));

    /// The kind atom of the canonical nil tuple.
    pub const NIL: Self = Atom(Bytes::from_static(b"nil"));

    /// The kind atom of the canonical true tuple.
    pub const TRUE: Self = Atom(Bytes::from_static(b"true"));

    /// The kind atom of the canonical false tuple.
    pub const FALSE: Self = Atom(Bytes::from_static(b"false"));

    /// The kind atom of a canonical dictionary tuple.
    pub const DICT: Self = Atom(Bytes::from_static(b"dict"));

    /// The kind atom of a canonical regular expression tuple.
    pub const REGEX: Self = Atom(Bytes::from_static(b"regex"));

    /// The kind atom of a canonical timestamp tuple.
    pub const TIME: Self = Atom(Bytes::from_static(b"time"));

    /// The option atom of a case-insensitive regular expression.
    pub const CASELESS: Self = Atom(Bytes::from_static(b"caseless"));

    /// The option atom of an extended-syntax regular expression.
    pub const EXTENDED: Self = Atom(Bytes::from_static(b"extended"));

    /// The option atom of a multi-line regular expression.
    pub const MULTILINE: Self = Atom(Bytes::from_static(b"multiline"));
}

impl Atom {
    /// Creates an atom from the raw octets of its name.
    pub fn new(name: Bytes) -> Self {
        Atom(name)
    }

    /// Returns the octets of the atom's name.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the atom's name in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the atom's name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}


//--- From

impl From<Bytes> for Atom {
    fn from(name: Bytes) -> Self {
        Atom(name)
    }
}

impl<'a> From<&'a str> for Atom {
    fn from(name: &'a str) -> Self {
        Atom(Bytes::copy_from_slice(name.as_bytes()))
    }
}

impl From<String> for Atom {
    fn from(name: String) -> Self {
        Atom(Bytes::from(name))
    }
}


//--- Display

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}


//------------ RegexOptions --------------------------------------------------

/// The option flags of a regular expression value.
///
/// Only the three options with a defined atom in the canonical tuple
/// convention are carried. They appear in the canonical options list in
/// the fixed order caseless, extended, multiline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RegexOptions {
    /// Match without regard to case.
    pub caseless: bool,

    /// Ignore whitespace and comments in the pattern.
    pub extended: bool,

    /// Let anchors match at every line boundary.
    pub multiline: bool,
}


//------------ Timestamp -----------------------------------------------------

/// A point in time relative to the Unix epoch.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Timestamp {
    /// Whole seconds since 1970-01-01T00:00:00Z.
    ///
    /// Negative values describe instants before the epoch.
    pub seconds: i64,

    /// The sub-second part in microseconds.
    pub micros: u32,
}

impl Timestamp {
    /// Creates a timestamp from seconds and microseconds.
    pub fn new(seconds: i64, micros: u32) -> Self {
        Timestamp { seconds, micros }
    }
}


//------------ Value ---------------------------------------------------------

/// A value that can be encoded into the external term format.
///
/// The first seven variants have a direct representation on the wire.
/// The remaining ones, nil through timestamp, are the extended values:
/// they only exist at the host level and are rewritten into tagged tuples
/// by [`canonicalize`][crate::canonicalize] before encoding. Handing them
/// to the primitive encoder directly fails with
/// [`EncodeError::Unsupported`][crate::EncodeError::Unsupported].
///
/// Tuples and lists both hold a sequence of element values but encode
/// differently: a tuple is fixed-arity without a terminator while a list
/// carries a trailing empty-list tag. The distinction is part of the
/// value, never inferred.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A symbolic name.
    Atom(Atom),

    /// An uninterpreted sequence of octets.
    Binary(Bytes),

    /// An integer within the native 64 bit signed range.
    Int(i64),

    /// An integer of arbitrary magnitude.
    ///
    /// The wire format does not distinguish how an integer was spelled:
    /// a big integer that happens to fit a smaller tag is encoded
    /// through that tag.
    BigInt(BigInt),

    /// A floating point number.
    Float(f64),

    /// A fixed-arity aggregate of values.
    Tuple(Vec<Value>),

    /// A variable-length sequence of values.
    List(Vec<Value>),

    /// The absence of a value.
    Nil,

    /// A boolean.
    Bool(bool),

    /// An unordered key/value mapping, kept as a sequence of pairs.
    ///
    /// Pair order is preserved as given, which keeps the canonical dict
    /// encoding deterministic for a given value.
    Map(Vec<(Value, Value)>),

    /// A regular expression as its source pattern and options.
    Regex(Bytes, RegexOptions),

    /// A point in time.
    Time(Timestamp),
}

impl Value {
    /// Returns the name of the value's variant.
    ///
    /// This is useful for error messages.
    pub fn kind(&self) -> &'static str {
        match *self {
            Value::Atom(_) => "atom",
            Value::Binary(_) => "binary",
            Value::Int(_) | Value::BigInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Map(_) => "map",
            Value::Regex(..) => "regex",
            Value::Time(_) => "timestamp",
        }
    }
}


//--- From

macro_rules! int_from {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for Value {
                fn from(int: $t) -> Self {
                    Value::Int(int.into())
                }
            }
        )*
    }
}

int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(int: u64) -> Self {
        match i64::try_from(int) {
            Ok(int) => Value::Int(int),
            Err(_) => Value::BigInt(int.into()),
        }
    }
}

impl From<BigInt> for Value {
    fn from(int: BigInt) -> Self {
        Value::BigInt(int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Atom> for Value {
    fn from(atom: Atom) -> Self {
        Value::Atom(atom)
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Binary(bytes)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(string: &'a str) -> Self {
        Value::Binary(Bytes::copy_from_slice(string.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Value::Binary(Bytes::from(string))
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::List(elements)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs)
    }
}

impl From<Timestamp> for Value {
    fn from(time: Timestamp) -> Self {
        Value::Time(time)
    }
}


//------------ t! ------------------------------------------------------------

/// Creates a tuple value from a sequence of elements.
///
/// Every argument is converted into a [`Value`] via `From`, the results
/// become the elements of a [`Value::Tuple`]. This mirrors the tuple
/// literal shorthand of the format's home ecosystem.
///
/// ```
/// use bert::{Atom, Value};
///
/// assert_eq!(
///     bert::t![Atom::from("ok"), 200],
///     Value::Tuple(vec![
///         Value::Atom(Atom::from("ok")),
///         Value::Int(200),
///     ])
/// );
/// ```
#[macro_export]
macro_rules! t {
    ( $( $elem:expr ),* $(,)? ) => {
        $crate::Value::Tuple(vec![ $( $crate::Value::from($elem) ),* ])
    };
}


//============ Tests =========================================================
