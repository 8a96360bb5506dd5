#![no_main]

use libfuzzer_sys::fuzz_target;
use bert::{encode_term, Value};
use num_bigint::BigInt;

fuzz_target!(|data: &[u8]| {
    let int = BigInt::from_signed_bytes_le(data);
    let encoded = encode_term(&Value::BigInt(int)).unwrap();
    assert_eq!(encoded[0], 131);

    if data.len() >= 8 {
        let mut bits = [0u8; 8];
        bits.copy_from_slice(&data[..8]);
        let int = i64::from_be_bytes(bits);
        let encoded = encode_term(&Value::Int(int)).unwrap();
        assert_eq!(encoded[0], 131);

        let value = f64::from_bits(u64::from_be_bytes(bits));
        match encode_term(&Value::Float(value)) {
            Ok(encoded) => assert_eq!(encoded.len(), 2 + 31),
            Err(_) => assert!(!value.is_finite()),
        }
    }
});
