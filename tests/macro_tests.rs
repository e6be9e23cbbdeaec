use serde_llsd::{llsd, Date, LlsdMap, Uri, Value};

#[test]
fn test_llsd_macro_null() {
    let value = llsd!(null);
    assert_eq!(value, Value::Undefined);
}

#[test]
fn test_llsd_macro_booleans() {
    let true_val = llsd!(true);
    assert_eq!(true_val, Value::Boolean(true));

    let false_val = llsd!(false);
    assert_eq!(false_val, Value::Boolean(false));
}

#[test]
fn test_llsd_macro_numbers() {
    let int_val = llsd!(42);
    assert_eq!(int_val, Value::Integer(42));

    let float_val = llsd!(3.5);
    assert_eq!(float_val, Value::Real(3.5));

    let negative_val = llsd!(-123);
    assert_eq!(negative_val, Value::Integer(-123));
}

#[test]
fn test_llsd_macro_strings() {
    let string_val = llsd!("hello world");
    assert_eq!(string_val, Value::String("hello world".to_string()));

    let empty_string = llsd!("");
    assert_eq!(empty_string, Value::String(String::new()));
}

#[test]
fn test_llsd_macro_arrays() {
    let empty_array = llsd!([]);
    assert_eq!(empty_array, Value::Array(vec![]));

    let mixed_array = llsd!([1, "hello", true, null]);
    assert_eq!(
        mixed_array,
        Value::Array(vec![
            Value::Integer(1),
            Value::String("hello".to_string()),
            Value::Boolean(true),
            Value::Undefined,
        ])
    );
}

#[test]
fn test_llsd_macro_maps() {
    let empty_map = llsd!({});
    assert_eq!(empty_map, Value::Map(LlsdMap::new()));

    let nested = llsd!({
        "agent": {
            "id": 123,
            "name": "Bob",
            "online": true
        },
        "groups": ["builders", "scripters"],
        "count": 42,
    });

    match nested {
        Value::Map(ref map) => {
            assert_eq!(map.len(), 3);

            if let Some(Value::Map(agent)) = map.get("agent") {
                assert_eq!(agent.get("id"), Some(&Value::Integer(123)));
                assert_eq!(agent.get("name"), Some(&Value::from("Bob")));
                assert_eq!(agent.get("online"), Some(&Value::Boolean(true)));
            } else {
                panic!("Expected agent to be a map");
            }

            assert_eq!(
                map.get("groups"),
                Some(&llsd!(["builders", "scripters"]))
            );
            assert_eq!(map.get("count"), Some(&Value::Integer(42)));
        }
        _ => panic!("Expected map"),
    }
}

#[test]
fn test_llsd_macro_rich_kinds() {
    let when = Date::epoch();
    let value = llsd!({
        "home": (Uri::new("http://example.com")),
        "when": when,
        "data": (Value::binary(vec![0xde, 0xad]))
    });

    assert!(value.get("home").map_or(false, Value::is_uri));
    assert_eq!(value.get("when").and_then(Value::as_date), Some(when));
    assert_eq!(
        value.get("data").and_then(Value::as_binary),
        Some(&[0xde, 0xad][..])
    );
}

#[test]
fn test_llsd_value_methods() {
    let undef = llsd!(null);
    assert!(undef.is_undefined());
    assert!(!undef.is_boolean());
    assert!(!undef.is_integer());
    assert!(!undef.is_string());
    assert!(!undef.is_array());
    assert!(!undef.is_map());

    let bool_val = llsd!(true);
    assert_eq!(bool_val.as_bool(), Some(true));

    let array_val = llsd!([1, 2, 3]);
    assert_eq!(array_val.as_array().map(Vec::len), Some(3));

    let map_val = llsd!({"key": "value"});
    assert_eq!(map_val.as_map().map(LlsdMap::len), Some(1));
}
