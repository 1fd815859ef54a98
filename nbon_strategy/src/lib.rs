use nbon::Value;
use proptest::prelude::*;

/// arbitrary string without zero bytes, for use with proptest
pub fn arb_string() -> impl Strategy<Value = String> { "[^\\x00]{0,24}" }

/// arbitrary byte blob for use with proptest
pub fn arb_binary() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// arbitrary integer in the range every NBON reader must round trip exactly
pub fn arb_safe_int() -> impl Strategy<Value = i64> {
    const MAX_SAFE: i64 = (1 << 53) - 1;
    -MAX_SAFE..=MAX_SAFE
}

/// arbitrary NBON value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        // misc
        any::<bool>().prop_map(Value::from),
        any::<()>().prop_map(Value::from),
        arb_string().prop_map(Value::from),
        arb_binary().prop_map(Value::from),
        // integers
        any::<u8>().prop_map(Value::from),
        any::<i8>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        arb_safe_int().prop_map(Value::from),
        // floats
        any::<f32>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Array),
                prop::collection::vec((arb_string(), inner), 0..10).prop_map(Value::Object)
            ]
        },
    )
}
