//! The tag octet of an encoded term.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::fmt;


//------------ Tag -----------------------------------------------------------

/// The tag of a term in the external term format.
///
/// Every encoded term starts with a single octet that identifies the kind
/// of term and thereby how the octets following it are to be interpreted.
/// The type wraps that octet and provides constants for all the tags of
/// the format revision targeted by this crate.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Tag(u8);

/// # Constants for the Tags of the Format
///
impl Tag {
    /// The tag for an integer in the range 0 to 255, `SMALL_INTEGER_EXT`.
    pub const SMALL_INT: Self = Tag(97);

    /// The tag for a 32 bit signed integer, `INTEGER_EXT`.
    ///
    /// The encoder only uses this tag for values within the 28 bit signed
    /// range. See [`encode_term`][crate::encode_term] for the exact split
    /// between the integer tags.
    pub const INT: Self = Tag(98);

    /// The tag for a float in its 31 octet decimal string form,
    /// `FLOAT_EXT`.
    pub const FLOAT: Self = Tag(99);

    /// The tag for an atom with a 16 bit name length, `ATOM_EXT`.
    pub const ATOM: Self = Tag(100);

    /// The tag for a tuple of up to 255 elements, `SMALL_TUPLE_EXT`.
    pub const SMALL_TUPLE: Self = Tag(104);

    /// The tag for a tuple with a 32 bit arity, `LARGE_TUPLE_EXT`.
    pub const LARGE_TUPLE: Self = Tag(105);

    /// The tag for the empty list, `NIL_EXT`.
    ///
    /// This tag also terminates every non-empty list.
    pub const NIL: Self = Tag(106);

    /// The tag for a byte-packed list of small integers, `STRING_EXT`.
    ///
    /// The encoder never produces this tag. Lists always use
    /// [`Tag::LIST`], no matter their content.
    pub const STRING: Self = Tag(107);

    /// The tag for a list with a 32 bit length prefix, `LIST_EXT`.
    pub const LIST: Self = Tag(108);

    /// The tag for a binary, `BINARY_EXT`.
    pub const BIN: Self = Tag(109);

    /// The tag for a bignum of up to 255 magnitude octets,
    /// `SMALL_BIG_EXT`.
    pub const SMALL_BIGNUM: Self = Tag(110);

    /// The tag for a bignum with a 32 bit octet count, `LARGE_BIG_EXT`.
    pub const LARGE_BIGNUM: Self = Tag(111);
}

impl Tag {
    /// Returns the tag octet.
    pub fn to_u8(self) -> u8 {
        self.0
    }
}


//--- Display and Debug

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Tag::SMALL_INT => write!(f, "SMALL_INTEGER_EXT"),
            Tag::INT => write!(f, "INTEGER_EXT"),
            Tag::FLOAT => write!(f, "FLOAT_EXT"),
            Tag::ATOM => write!(f, "ATOM_EXT"),
            Tag::SMALL_TUPLE => write!(f, "SMALL_TUPLE_EXT"),
            Tag::LARGE_TUPLE => write!(f, "LARGE_TUPLE_EXT"),
            Tag::NIL => write!(f, "NIL_EXT"),
            Tag::STRING => write!(f, "STRING_EXT"),
            Tag::LIST => write!(f, "LIST_EXT"),
            Tag::BIN => write!(f, "BINARY_EXT"),
            Tag::SMALL_BIGNUM => write!(f, "SMALL_BIG_EXT"),
            Tag::LARGE_BIGNUM => write!(f, "LARGE_BIG_EXT"),
            tag => write!(f, "[{}]", tag.0),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


//============ Tests =========================================================
