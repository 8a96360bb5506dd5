//! Canonicalization of extended values.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.
//!
//! The wire format has no tags for nil, booleans, maps, regular
//! expressions or timestamps. Values of these kinds are rewritten into
//! tuples of the form `{bert, Kind, ...}` before they reach the octet
//! level. The rewrite is a pure value-to-value transform; the primitive
//! encoder knows nothing about extended values and the two stages stay
//! separately callable.

use bytes::Bytes;
use crate::value::{Atom, RegexOptions, Timestamp, Value};


/// The number of seconds in a megasecond.
const MEGA: i64 = 1_000_000;


//------------ canonicalize --------------------------------------------------

/// Rewrites extended values into their canonical tuple form.
///
/// The transform recurses through containers: elements of lists and
/// tuples as well as the keys and values of maps are canonicalized
/// independently. Values that already have a primitive representation
/// are returned unchanged.
///
/// Canonicalization never fails. Composing it with
/// [`encode_term`][crate::encode_term] is exactly what
/// [`encode`][crate::encode] does.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Nil => kind_tuple(Atom::NIL),
        Value::Bool(true) => kind_tuple(Atom::TRUE),
        Value::Bool(false) => kind_tuple(Atom::FALSE),
        Value::Map(pairs) => canonical_dict(pairs),
        Value::Regex(source, options) => canonical_regex(source, options),
        Value::Time(time) => canonical_time(time),
        Value::List(elements) => {
            Value::List(elements.into_iter().map(canonicalize).collect())
        }
        Value::Tuple(elements) => {
            Value::Tuple(elements.into_iter().map(canonicalize).collect())
        }
        value => value,
    }
}

/// Builds a two-element `{bert, Kind}` tuple.
fn kind_tuple(kind: Atom) -> Value {
    Value::Tuple(vec![Value::Atom(Atom::BERT), Value::Atom(kind)])
}

/// Builds the canonical `{bert, dict, Pairs}` tuple of a map.
///
/// Every pair becomes a two-element tuple of the canonicalized key and
/// value. Pair order is taken from the map value as given.
fn canonical_dict(pairs: Vec<(Value, Value)>) -> Value {
    let pairs = pairs.into_iter().map(|(key, value)| {
        Value::Tuple(vec![canonicalize(key), canonicalize(value)])
    }).collect();
    Value::Tuple(vec![
        Value::Atom(Atom::BERT),
        Value::Atom(Atom::DICT),
        Value::List(pairs),
    ])
}

/// Builds the canonical `{bert, regex, Source, Options}` tuple.
///
/// The options list carries an atom for each set flag, in the fixed
/// order caseless, extended, multiline.
fn canonical_regex(source: Bytes, options: RegexOptions) -> Value {
    let mut atoms = Vec::new();
    if options.caseless {
        atoms.push(Value::Atom(Atom::CASELESS));
    }
    if options.extended {
        atoms.push(Value::Atom(Atom::EXTENDED));
    }
    if options.multiline {
        atoms.push(Value::Atom(Atom::MULTILINE));
    }
    Value::Tuple(vec![
        Value::Atom(Atom::BERT),
        Value::Atom(Atom::REGEX),
        Value::Binary(source),
        Value::List(atoms),
    ])
}

/// Builds the canonical `{bert, time, Mega, Sec, Micro}` tuple.
///
/// The seconds split into megaseconds and the remainder with flooring
/// division, so instants before the epoch keep a remainder in
/// `0..1_000_000`.
fn canonical_time(time: Timestamp) -> Value {
    Value::Tuple(vec![
        Value::Atom(Atom::BERT),
        Value::Atom(Atom::TIME),
        Value::Int(time.seconds.div_euclid(MEGA)),
        Value::Int(time.seconds.rem_euclid(MEGA)),
        Value::Int(time.micros.into()),
    ])
}


//============ Tests =========================================================
