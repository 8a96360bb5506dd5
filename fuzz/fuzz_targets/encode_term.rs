#![no_main]

use libfuzzer_sys::fuzz_target;
use bert::{encode, encode_term, Atom, Value};
use bytes::Bytes;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    let encoded = encode_term(&Value::Binary(bytes.clone())).unwrap();
    assert_eq!(encoded.len(), 6 + data.len());

    // Atom names are limited to their 16 bit length field.
    let atom = encode_term(&Value::Atom(Atom::new(bytes.clone())));
    assert_eq!(atom.is_ok(), data.len() <= 0xFFFF);

    let list = Value::List(
        data.iter().map(|&byte| Value::Int(byte.into())).collect()
    );
    let encoded = encode_term(&list).unwrap();
    if data.is_empty() {
        assert_eq!(encoded.to_vec(), b"\x83\x6a");
    }
    else {
        assert_eq!(encoded.last(), Some(&106));
    }

    let canonical = encode(Value::Map(vec![
        (Value::Binary(bytes), Value::Nil),
    ]));
    assert!(canonical.is_ok());
});
