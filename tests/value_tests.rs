use serde_llsd::{llsd, Date, Error, Kind, LlsdMap, Uri, Value};
use std::collections::HashMap;
use uuid::Uuid;

#[test]
fn test_deep_copy_independence() {
    let original = llsd!({
        "list": [1, {"inner": "a"}],
        "flag": true
    });
    let mut copy = original.clone();

    let list = copy
        .as_map_mut()
        .and_then(|m| m.get_mut("list"))
        .and_then(Value::as_array_mut)
        .unwrap();
    list.push(Value::Integer(2));
    if let Some(Value::Map(inner)) = list.get_mut(1) {
        inner.insert("inner".to_string(), Value::from("changed"));
    }

    assert_eq!(
        original,
        llsd!({
            "list": [1, {"inner": "a"}],
            "flag": true
        })
    );
    assert_ne!(copy, original);
    assert_eq!(
        copy.get("list").and_then(|l| l.as_array()).map(Vec::len),
        Some(3)
    );
}

#[test]
fn test_move_leaves_source_inert() {
    let mut source = llsd!({"a": [1, 2, 3]});
    let expected = source.clone();

    let moved = source.take();
    assert_eq!(moved, expected);
    assert!(source.is_undefined());

    source = Value::from("reassigned");
    assert_eq!(source.as_str(), Some("reassigned"));
}

#[test]
fn test_kind_names() {
    let cases = [
        (Value::Undefined, "undef"),
        (Value::Boolean(true), "boolean"),
        (Value::Integer(1), "integer"),
        (Value::Real(1.0), "real"),
        (Value::from("s"), "string"),
        (Value::Uuid(Uuid::nil()), "uuid"),
        (Value::Date(Date::epoch()), "date"),
        (Value::from(Uri::new("x")), "uri"),
        (Value::binary(vec![]), "binary"),
        (Value::Array(vec![]), "array"),
        (Value::Map(LlsdMap::new()), "map"),
    ];
    for (value, name) in cases {
        assert_eq!(value.kind().as_str(), name);
        assert_eq!(value.kind().to_string(), name);
    }
}

#[test]
fn test_accessors_do_not_convert() {
    let integer = Value::Integer(3);
    assert_eq!(integer.as_i32(), Some(3));
    assert_eq!(integer.as_f64(), None);
    assert_eq!(integer.as_str(), None);

    let uri = Value::from(Uri::new("http://x"));
    assert_eq!(uri.as_str(), None);
    assert_eq!(uri.as_uri().map(Uri::as_str), Some("http://x"));
}

#[test]
fn test_try_from_value() {
    assert_eq!(bool::try_from(Value::Boolean(true)), Ok(true));
    assert_eq!(i32::try_from(Value::Integer(-4)), Ok(-4));
    assert_eq!(String::try_from(Value::from("x")), Ok("x".to_string()));
    assert_eq!(
        Vec::<u8>::try_from(Value::binary(vec![1])),
        Ok(vec![1])
    );
    assert_eq!(
        i32::try_from(Value::Real(1.0)),
        Err(Error::TypeMismatch {
            expected: Kind::Integer,
            found: Kind::Real
        })
    );
}

#[test]
fn test_wide_integers_checked() {
    assert_eq!(Value::try_from(5_u64), Ok(Value::Integer(5)));
    assert_eq!(Value::try_from(-5_i64), Ok(Value::Integer(-5)));
    assert!(matches!(
        Value::try_from(u32::MAX),
        Err(Error::IntegerOutOfRange(_))
    ));
    assert!(matches!(
        Value::try_from(i64::from(i32::MIN) - 1),
        Err(Error::IntegerOutOfRange(_))
    ));
}

#[test]
fn test_map_from_hashmap_is_ordered() {
    let mut source = HashMap::new();
    for key in ["delta", "alpha", "charlie", "bravo"] {
        source.insert(key.to_string(), Value::Undefined);
    }
    let map = LlsdMap::from(source);
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<i32>), Value::Undefined);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
}

#[test]
fn test_values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Value>();
}
