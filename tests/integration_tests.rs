use serde::{Deserialize, Serialize};
use serde_llsd::{from_slice, from_value, json, to_value, to_vec, Error, Value};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Event {
    Login { user: u32 },
    Chat(String),
    Teleport(i32, i32, i32),
    Logout,
}

fn binary_roundtrip<T>(value: &T) -> T
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let bytes = to_vec(&to_value(value).unwrap()).unwrap();
    from_value(from_slice(&bytes).unwrap()).unwrap()
}

fn json_roundtrip<T>(value: &T) -> T
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let text = json::to_string(&to_value(value).unwrap()).unwrap();
    from_value(json::from_str(&text).unwrap()).unwrap()
}

fn sample_order() -> Order {
    Order {
        order_id: 1001,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "developer".to_string()],
        },
        items: vec![
            Product {
                sku: "A-1".to_string(),
                price: 9.99,
                quantity: 2,
            },
            Product {
                sku: "B-2".to_string(),
                price: 14.5,
                quantity: 1,
            },
        ],
        total: 34.48,
        note: None,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    assert_eq!(binary_roundtrip(&user), user);
    assert_eq!(json_roundtrip(&user), user);
}

#[test]
fn test_nested_struct() {
    let order = sample_order();
    assert_eq!(binary_roundtrip(&order), order);
    assert_eq!(json_roundtrip(&order), order);
}

#[test]
fn test_none_is_undefined() {
    let value = to_value(&sample_order()).unwrap();
    assert_eq!(value.get("note"), Some(&Value::Undefined));
}

#[test]
fn test_enum_variants() {
    for event in [
        Event::Login { user: 7 },
        Event::Chat("hi".to_string()),
        Event::Teleport(128, 128, -20),
        Event::Logout,
    ] {
        assert_eq!(binary_roundtrip(&event), event);
    }
}

#[test]
fn test_map_with_string_keys() {
    let mut scores = BTreeMap::new();
    scores.insert("alice".to_string(), 10);
    scores.insert("bob".to_string(), -3);
    assert_eq!(binary_roundtrip(&scores), scores);
}

#[test]
fn test_integer_keys_rejected() {
    let mut by_id = BTreeMap::new();
    by_id.insert(1_u8, "one");
    assert_eq!(to_value(&by_id), Err(Error::KeyMustBeString));
}

#[test]
fn test_wide_integer_out_of_range() {
    #[derive(Serialize)]
    struct Wide {
        big: u64,
    }

    let err = to_value(&Wide { big: 1 << 33 }).unwrap_err();
    assert!(matches!(err, Error::IntegerOutOfRange(_)));
}

#[test]
fn test_tuple_and_unit() {
    let tuple = (1_i16, "two".to_string(), 3.0_f32);
    assert_eq!(binary_roundtrip(&tuple), tuple);
    let () = binary_roundtrip(&());
}

#[test]
fn test_shape_mismatch_is_error() {
    let value = to_value(&"just a string").unwrap();
    assert!(from_value::<User>(value).is_err());
}
