//! Encoding values into octets.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.
//!
//! The functions here implement the primitive stage: a leading version
//! octet followed by an exhaustive, recursive tag dispatch over the
//! value. Extended values are rejected at this level; they are expected
//! to have been rewritten by [`canonicalize`][crate::canonicalize], which
//! [`encode`] does on the caller's behalf.

use std::convert::TryFrom;
use bytes::Bytes;
use num_bigint::{BigInt, Sign};
use smallvec::SmallVec;
use crate::buf::Buffer;
use crate::canon::canonicalize;
use crate::error::EncodeError;
use crate::tag::Tag;
use crate::value::{Atom, Value};


//------------ Constants -----------------------------------------------------

/// The version octet leading every top-level encoding.
const VERSION: u8 = 131;

/// The smallest integer that still uses the INTEGER_EXT tag.
const MIN_INT: i64 = -134_217_728; // -(1 << 27)

/// The largest integer that still uses the INTEGER_EXT tag.
const MAX_INT: i64 = 134_217_727; // (1 << 27) - 1

/// The fixed width of the float field in octets.
const FLOAT_LEN: usize = 31;


//------------ Public Functions ----------------------------------------------

/// Encodes a value into the external term format.
///
/// The value is canonicalized first, so extended values like booleans
/// and maps are accepted. This is the composition of
/// [`canonicalize`][crate::canonicalize] and [`encode_term`].
///
/// ```
/// use bert::{encode, Value};
///
/// assert_eq!(
///     encode(Value::Int(1)).unwrap().as_ref(),
///     b"\x83\x61\x01"
/// );
/// ```
pub fn encode(value: Value) -> Result<Bytes, EncodeError> {
    encode_term(&canonicalize(value))
}

/// Encodes a value that is already in primitive form.
///
/// Writes the version octet followed by the recursive encoding of
/// `value` and returns the collected octets. Extended values fail with
/// [`EncodeError::Unsupported`]; run them through
/// [`canonicalize`][crate::canonicalize] first or use [`encode`].
pub fn encode_term(value: &Value) -> Result<Bytes, EncodeError> {
    let mut buf = Buffer::new();
    encode_term_into(value, &mut buf)?;
    Ok(buf.into_bytes())
}

/// Encodes a value in primitive form into the given buffer.
///
/// This is [`encode_term`] for callers that want control over the
/// buffer, for instance to start with a different capacity. One version
/// octet and one complete term are appended per call.
pub fn encode_term_into(
    value: &Value, buf: &mut Buffer
) -> Result<(), EncodeError> {
    buf.append_byte(VERSION);
    encode_value(buf, value)
}


//------------ Term Encoding -------------------------------------------------

/// Encodes a single value without the version octet.
///
/// Recurses for the elements of tuples and lists. Stack depth equals
/// the nesting depth of the value; callers that take untrusted input
/// need to bound that depth themselves.
fn encode_value(buf: &mut Buffer, value: &Value) -> Result<(), EncodeError> {
    match *value {
        Value::Atom(ref atom) => encode_atom(buf, atom),
        Value::Binary(ref bytes) => encode_binary(buf, bytes),
        Value::Int(int) => {
            encode_int(buf, int);
            Ok(())
        }
        Value::BigInt(ref int) => encode_big_int(buf, int),
        Value::Float(value) => encode_float(buf, value),
        Value::Tuple(ref elements) => encode_tuple(buf, elements),
        Value::List(ref elements) => encode_list(buf, elements),
        Value::Nil | Value::Bool(_) | Value::Map(_)
        | Value::Regex(..) | Value::Time(_) => {
            Err(EncodeError::Unsupported(value.kind()))
        }
    }
}

/// Encodes an atom as the ATOM tag, a 16 bit length and the name.
fn encode_atom(buf: &mut Buffer, atom: &Atom) -> Result<(), EncodeError> {
    let len = u16::try_from(atom.len()).map_err(|_| {
        EncodeError::Overflow { kind: "atom", len: atom.len() }
    })?;
    buf.append_byte(Tag::ATOM.to_u8());
    buf.append_u16(len);
    buf.append(atom.as_bytes());
    Ok(())
}

/// Encodes a binary as the BIN tag, a 32 bit length and the octets.
fn encode_binary(buf: &mut Buffer, bytes: &Bytes) -> Result<(), EncodeError> {
    let len = u32::try_from(bytes.len()).map_err(|_| {
        EncodeError::Overflow { kind: "binary", len: bytes.len() }
    })?;
    buf.append_byte(Tag::BIN.to_u8());
    buf.append_u32(len);
    buf.append(bytes.as_ref());
    Ok(())
}

/// Encodes a native integer through the three size tiers.
///
/// Values in 0 to 255 take a single octet behind the SMALL_INT tag,
/// values within the 28 bit signed range four octets behind the INT
/// tag, everything else becomes a bignum. A native integer has at most
/// eight magnitude octets, so its bignum never needs the large tag and
/// the tiering as a whole cannot fail.
fn encode_int(buf: &mut Buffer, int: i64) {
    if int >= 0 && int <= 0xFF {
        buf.append_byte(Tag::SMALL_INT.to_u8());
        buf.append_byte(int as u8);
    }
    else if int >= MIN_INT && int <= MAX_INT {
        buf.append_byte(Tag::INT.to_u8());
        buf.append_i32(int as i32);
    }
    else {
        let mut magnitude = SmallVec::<[u8; 16]>::new();
        let mut rest = int.unsigned_abs();
        while rest != 0 {
            magnitude.push(rest as u8);
            rest >>= 8;
        }
        encode_bignum(buf, int < 0, &magnitude);
    }
}

/// Encodes an arbitrary-magnitude integer.
///
/// Integers that fit the native range fall through to the tiered
/// encoding, so the wire never reflects how the caller spelled the
/// number.
fn encode_big_int(
    buf: &mut Buffer, int: &BigInt
) -> Result<(), EncodeError> {
    if let Ok(int) = i64::try_from(int) {
        encode_int(buf, int);
        return Ok(())
    }
    let (sign, magnitude) = int.to_bytes_le();
    if magnitude.len() > u32::MAX as usize {
        return Err(EncodeError::Overflow {
            kind: "bignum", len: magnitude.len()
        })
    }
    encode_bignum(buf, sign == Sign::Minus, &magnitude);
    Ok(())
}

/// Writes a bignum from its sign and little-endian magnitude octets.
///
/// The declared octet count is the length of `magnitude`, so count and
/// content cannot disagree. The caller guarantees the count fits 32
/// bits.
fn encode_bignum(buf: &mut Buffer, negative: bool, magnitude: &[u8]) {
    if magnitude.len() < 256 {
        buf.append_byte(Tag::SMALL_BIGNUM.to_u8());
        buf.append_byte(magnitude.len() as u8);
    }
    else {
        buf.append_byte(Tag::LARGE_BIGNUM.to_u8());
        buf.append_u32(magnitude.len() as u32);
    }
    buf.append_byte(if negative { 1 } else { 0 });
    buf.append(magnitude);
}

/// Encodes a float as the FLOAT tag and a fixed 31 octet field.
///
/// The field holds the decimal string form of the value, zero padded on
/// the right. The fixed width is part of the wire format, not an
/// optimization.
fn encode_float(buf: &mut Buffer, value: f64) -> Result<(), EncodeError> {
    if !value.is_finite() {
        return Err(EncodeError::NonFinite)
    }
    let formatted = format_decimal(value);
    if formatted.len() > FLOAT_LEN {
        return Err(EncodeError::Overflow {
            kind: "float", len: formatted.len()
        })
    }
    let mut field = [0u8; FLOAT_LEN];
    field[..formatted.len()].copy_from_slice(formatted.as_bytes());
    buf.append_byte(Tag::FLOAT.to_u8());
    buf.append(&field);
    Ok(())
}

/// Formats a float the way C's `%.15e` directive does.
///
/// The standard library's `{:e}` writes positive exponents without a
/// sign and all exponents without padding, so the exponent part is
/// rebuilt: an explicit sign followed by at least two digits.
fn format_decimal(value: f64) -> String {
    let formatted = format!("{:.15e}", value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => (formatted.as_str(), "0"),
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    if digits.len() < 2 {
        format!("{}e{}0{}", mantissa, sign, digits)
    }
    else {
        format!("{}e{}{}", mantissa, sign, digits)
    }
}

/// Encodes a tuple as an arity followed by the elements, no terminator.
fn encode_tuple(
    buf: &mut Buffer, elements: &[Value]
) -> Result<(), EncodeError> {
    if elements.len() < 256 {
        buf.append_byte(Tag::SMALL_TUPLE.to_u8());
        buf.append_byte(elements.len() as u8);
    }
    else {
        let arity = u32::try_from(elements.len()).map_err(|_| {
            EncodeError::Overflow { kind: "tuple", len: elements.len() }
        })?;
        buf.append_byte(Tag::LARGE_TUPLE.to_u8());
        buf.append_u32(arity);
    }
    for element in elements {
        encode_value(buf, element)?;
    }
    Ok(())
}

/// Encodes a list.
///
/// The empty list is the bare NIL tag. Anything else is the LIST tag, a
/// 32 bit length, the elements, and a trailing NIL tag as terminator.
fn encode_list(
    buf: &mut Buffer, elements: &[Value]
) -> Result<(), EncodeError> {
    if elements.is_empty() {
        buf.append_byte(Tag::NIL.to_u8());
        return Ok(())
    }
    let len = u32::try_from(elements.len()).map_err(|_| {
        EncodeError::Overflow { kind: "list", len: elements.len() }
    })?;
    buf.append_byte(Tag::LIST.to_u8());
    buf.append_u32(len);
    for element in elements {
        encode_value(buf, element)?;
    }
    buf.append_byte(Tag::NIL.to_u8());
    Ok(())
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use crate::t;
    use crate::value::{RegexOptions, Timestamp};
    use super::*;

    fn term(value: Value) -> Vec<u8> {
        encode_term(&value).unwrap().to_vec()
    }

    #[test]
    fn integer_tiers() {
        assert_eq!(term(Value::Int(0)), b"\x83\x61\x00");
        assert_eq!(term(Value::Int(255)), b"\x83\x61\xff");
        assert_eq!(term(Value::Int(256)), b"\x83\x62\x00\x00\x01\x00");
        assert_eq!(term(Value::Int(-1)), b"\x83\x62\xff\xff\xff\xff");
        assert_eq!(
            term(Value::Int(134_217_727)),
            b"\x83\x62\x07\xff\xff\xff"
        );
        assert_eq!(
            term(Value::Int(-134_217_728)),
            b"\x83\x62\xf8\x00\x00\x00"
        );
    }

    #[test]
    fn bignum_boundaries() {
        // One past MAX_INT: sign octet 0, magnitude 0x0800_0000.
        assert_eq!(
            term(Value::Int(134_217_728)),
            b"\x83\x6e\x04\x00\x00\x00\x00\x08"
        );
        // One past MIN_INT downwards: sign octet 1.
        assert_eq!(
            term(Value::Int(-134_217_729)),
            b"\x83\x6e\x04\x01\x01\x00\x00\x08"
        );
    }

    #[test]
    fn bignum_declared_count_matches() {
        // 2^64 has 65 significant bits and thus nine magnitude octets.
        let encoded = term(Value::BigInt(BigInt::from(1u128 << 64)));
        assert_eq!(encoded[1], 110);
        assert_eq!(encoded[2], 9);
        assert_eq!(encoded[3], 0);
        assert_eq!(encoded.len(), 4 + 9);
        assert_eq!(
            &encoded[4..],
            b"\x00\x00\x00\x00\x00\x00\x00\x00\x01"
        );
    }

    #[test]
    fn big_int_uses_small_tags_when_it_fits() {
        assert_eq!(term(Value::BigInt(BigInt::from(7))), b"\x83\x61\x07");
        assert_eq!(
            term(Value::BigInt(BigInt::from(-7))),
            b"\x83\x62\xff\xff\xff\xf9"
        );
    }

    #[test]
    fn native_int_extremes() {
        assert_eq!(
            term(Value::Int(i64::MAX)),
            b"\x83\x6e\x08\x00\xff\xff\xff\xff\xff\xff\xff\x7f"
        );
        assert_eq!(
            term(Value::Int(i64::MIN)),
            b"\x83\x6e\x08\x01\x00\x00\x00\x00\x00\x00\x00\x80"
        );
    }

    #[test]
    fn floats() {
        let encoded = term(Value::Float(1.5));
        assert_eq!(encoded.len(), 2 + 31);
        assert_eq!(encoded[1], 99);
        assert_eq!(&encoded[2..23], b"1.500000000000000e+00");
        assert!(encoded[23..].iter().all(|&b| b == 0));
    }

    #[test]
    fn float_negative_exponent() {
        let encoded = term(Value::Float(0.15));
        assert_eq!(&encoded[2..23], b"1.500000000000000e-01");
    }

    #[test]
    fn float_field_is_always_31_octets() {
        for value in [
            0.0, -0.0, 1.0, -1.5, 1e300, -1e300, 5e-324,
            std::f64::consts::PI,
        ] {
            assert_eq!(term(Value::Float(value)).len(), 2 + 31);
        }
    }

    #[test]
    fn non_finite_floats_fail() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert_eq!(
                encode_term(&Value::Float(value)),
                Err(EncodeError::NonFinite)
            );
        }
    }

    #[test]
    fn atoms() {
        assert_eq!(
            term(Value::Atom(Atom::from("foo"))),
            b"\x83\x64\x00\x03foo"
        );
        assert_eq!(
            term(Value::Atom(Atom::from(""))),
            b"\x83\x64\x00\x00"
        );
    }

    #[test]
    fn atom_name_overflow() {
        let name = Bytes::from(vec![b'a'; 70_000]);
        assert_eq!(
            encode_term(&Value::Atom(Atom::new(name))),
            Err(EncodeError::Overflow { kind: "atom", len: 70_000 })
        );
    }

    #[test]
    fn binaries() {
        assert_eq!(
            term(Value::from("abc")),
            b"\x83\x6d\x00\x00\x00\x03abc"
        );
        assert_eq!(
            term(Value::Binary(Bytes::new())),
            b"\x83\x6d\x00\x00\x00\x00"
        );
    }

    #[test]
    fn lists() {
        assert_eq!(term(Value::List(Vec::new())), b"\x83\x6a");
        assert_eq!(
            term(Value::List(vec![Value::Int(1), Value::Int(2)])),
            b"\x83\x6c\x00\x00\x00\x02\x61\x01\x61\x02\x6a"
        );
    }

    #[test]
    fn tuples() {
        assert_eq!(term(t![]), b"\x83\x68\x00");
        assert_eq!(
            term(t![1, 2, 3]),
            b"\x83\x68\x03\x61\x01\x61\x02\x61\x03"
        );
    }

    #[test]
    fn large_tuple() {
        let encoded = term(Value::Tuple(vec![Value::Int(0); 256]));
        assert_eq!(&encoded[..6], b"\x83\x69\x00\x00\x01\x00");
        assert_eq!(encoded.len(), 6 + 256 * 2);
    }

    #[test]
    fn extended_values_are_rejected() {
        assert_eq!(
            encode_term(&Value::Nil),
            Err(EncodeError::Unsupported("nil"))
        );
        assert_eq!(
            encode_term(&Value::Bool(true)),
            Err(EncodeError::Unsupported("boolean"))
        );
        assert_eq!(
            encode_term(&Value::Map(Vec::new())),
            Err(EncodeError::Unsupported("map"))
        );
        // Also when nested inside a container.
        assert_eq!(
            encode_term(&t![Value::Nil]),
            Err(EncodeError::Unsupported("nil"))
        );
    }

    #[test]
    fn encode_canonicalizes() {
        assert_eq!(
            encode(Value::Nil).unwrap().as_ref(),
            b"\x83\x68\x02\x64\x00\x04bert\x64\x00\x03nil"
        );
        assert_eq!(
            encode(Value::Map(vec![(Value::from("a"), Value::Int(1))]))
                .unwrap()
                .as_ref(),
            &b"\x83\x68\x03\x64\x00\x04bert\x64\x00\x04dict\
               \x6c\x00\x00\x00\x01\
               \x68\x02\x6d\x00\x00\x00\x01a\x61\x01\
               \x6a"[..]
        );
    }

    #[test]
    fn encode_regex() {
        assert_eq!(
            encode(Value::Regex(
                Bytes::from_static(b"^"),
                RegexOptions { caseless: true, ..Default::default() }
            )).unwrap().as_ref(),
            &b"\x83\x68\x04\x64\x00\x04bert\x64\x00\x05regex\
               \x6d\x00\x00\x00\x01^\
               \x6c\x00\x00\x00\x01\x64\x00\x08caseless\x6a"[..]
        );
    }

    #[test]
    fn encode_time() {
        assert_eq!(
            encode(Value::Time(Timestamp::new(1_254_976_067, 0)))
                .unwrap()
                .as_ref(),
            &b"\x83\x68\x05\x64\x00\x04bert\x64\x00\x04time\
               \x62\x00\x00\x04\xe6\x62\x00\x0e\xe4\xc3\x61\x00"[..]
        );
    }

    #[test]
    fn encode_into_custom_buffer() {
        let mut buf = Buffer::with_capacity(8);
        encode_term_into(&Value::Int(300), &mut buf).unwrap();
        assert_eq!(
            buf.into_bytes().as_ref(),
            b"\x83\x62\x00\x00\x01\x2c"
        );
    }

    #[test]
    fn format_decimal_matches_printf() {
        assert_eq!(format_decimal(0.0), "0.000000000000000e+00");
        assert_eq!(format_decimal(-2.5), "-2.500000000000000e+00");
        assert_eq!(format_decimal(1e300), "1.000000000000000e+300");
        assert_eq!(format_decimal(-3.25e-7), "-3.250000000000000e-07");
    }
}
