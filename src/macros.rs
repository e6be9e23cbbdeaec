/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// `null` is [`Value::Undefined`](crate::Value::Undefined). Any other leaf is passed to
/// `Value::from`, so it may be a literal or a parenthesized expression of a type with a
/// `From` conversion into `Value`.
///
/// ```rust
/// use serde_llsd::{llsd, Uri, Value};
///
/// let value = llsd!({
///     "name": "Alice",
///     "tags": ["admin", 7, null],
///     "home": (Uri::new("http://example.com")),
///     "offset": (-3)
/// });
/// assert_eq!(value.get("offset"), Some(&Value::Integer(-3)));
/// ```
#[macro_export]
macro_rules! llsd {
    // Handle null
    (null) => {
        $crate::Value::Undefined
    };

    // Handle true
    (true) => {
        $crate::Value::Boolean(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Boolean(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::llsd!($elem)),*])
    };

    // Handle empty map
    ({}) => {
        $crate::Value::Map($crate::LlsdMap::new())
    };

    // Handle non-empty map
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::LlsdMap::new();
        $(
            map.insert($key.to_string(), $crate::llsd!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Anything convertible with `Value::from`
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{LlsdMap, Value};

    #[test]
    fn test_llsd_macro_primitives() {
        assert_eq!(llsd!(null), Value::Undefined);
        assert_eq!(llsd!(true), Value::Boolean(true));
        assert_eq!(llsd!(false), Value::Boolean(false));
        assert_eq!(llsd!(42), Value::Integer(42));
        assert_eq!(llsd!(3.5), Value::Real(3.5));
        assert_eq!(llsd!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_llsd_macro_arrays() {
        assert_eq!(llsd!([]), Value::Array(vec![]));

        let arr = llsd!([1, "two", null]);
        match arr {
            Value::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Integer(1));
                assert_eq!(vec[1], Value::String("two".to_string()));
                assert_eq!(vec[2], Value::Undefined);
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_llsd_macro_maps() {
        assert_eq!(llsd!({}), Value::Map(LlsdMap::new()));

        let obj = llsd!({
            "name": "Alice",
            "age": 30,
            "nested": {"inner": [true]}
        });

        match obj {
            Value::Map(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(map.get("name"), Some(&Value::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Integer(30)));
                assert_eq!(
                    map.get("nested").and_then(|v| v.get("inner")),
                    Some(&Value::Array(vec![Value::Boolean(true)]))
                );
            }
            _ => panic!("Expected map"),
        }
    }

    #[test]
    fn test_llsd_macro_expressions() {
        let bytes = vec![1u8, 2];
        assert_eq!(llsd!((Value::binary(bytes.clone()))), Value::Binary(bytes));
        assert_eq!(llsd!([(-1), (Some(2))]), llsd!([(-1), 2]));
    }
}
