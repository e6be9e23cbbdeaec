//! Serialization of Rust data structures into [`Value`].
//!
//! This module provides [`ValueSerializer`], the serde `Serializer` behind
//! [`crate::to_value`]. Anything implementing `Serialize` can be turned into a `Value`
//! and from there written with either codec.
//!
//! ## Mapping
//!
//! - structs and maps become [`Value::Map`]; map keys must serialize as strings
//! - sequences, tuples and tuple structs become [`Value::Array`]
//! - `None`, `()` and unit structs become [`Value::Undefined`]
//! - byte slices (via `serde_bytes` or a manual `serialize_bytes`) become [`Value::Binary`]
//! - integers must fit in `i32`; wider values are range-checked, never truncated
//! - enum variants are externally tagged: `{"Variant": payload}`, or just the variant
//!   name for unit variants
//!
//! ```rust
//! use serde::Serialize;
//! use serde_llsd::{to_value, to_vec, Value};
//!
//! #[derive(Serialize)]
//! struct Avatar {
//!     name: String,
//!     age: u16,
//! }
//!
//! let value = to_value(&Avatar { name: "Alice".into(), age: 30 }).unwrap();
//! assert_eq!(value.get("age"), Some(&Value::Integer(30)));
//!
//! let bytes = to_vec(&value).unwrap();
//! assert_eq!(bytes[0], b'{');
//! ```
//!
//! Strings are kept as strings. Unlike the JSON bridge, `to_value` does not look at
//! string shape. A [`Value`] passed to `to_value` comes back unchanged, uuids, dates,
//! uris and blobs included.

use crate::{json, Date, Error, LlsdMap, Result, Uri, Value};
use serde::ser::Impossible;
use serde::{ser, Serialize};

// Newtype names `Value` uses for kinds the serde data model lacks.
pub(crate) const UUID_TOKEN: &str = "$serde_llsd::private::Uuid";
pub(crate) const DATE_TOKEN: &str = "$serde_llsd::private::Date";
pub(crate) const URI_TOKEN: &str = "$serde_llsd::private::Uri";
pub(crate) const BINARY_TOKEN: &str = "$serde_llsd::private::Binary";

/// Serializer whose output is a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: String,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: LlsdMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    map: LlsdMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(i32::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(i32::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(i32::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(i32::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Real(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Real(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Binary(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Undefined)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Undefined)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Undefined)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match name {
            DATE_TOKEN => {
                let seconds = value.serialize(EpochSeconds)?;
                Ok(Value::Date(Date::from_epoch_seconds(seconds)?))
            }
            UUID_TOKEN | BINARY_TOKEN => match value.serialize(self)? {
                Value::String(s) => json::classify_string(s),
                other => Ok(other),
            },
            URI_TOKEN => match value.serialize(self)? {
                Value::String(s) => Ok(Value::Uri(Uri::new(s))),
                other => Ok(other),
            },
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = LlsdMap::new();
        map.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            map: LlsdMap::new(),
        })
    }
}

impl SerializeVec {
    fn with_capacity(len: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: LlsdMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = LlsdMap::new();
        map.insert(self.name, Value::Array(self.vec));
        Ok(Value::Map(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::KeyMustBeString),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut outer = LlsdMap::new();
        outer.insert(self.name, Value::Map(self.map));
        Ok(Value::Map(outer))
    }
}

// Reads the raw seconds out of a date, which asks for them by reporting a compact format.
struct EpochSeconds;

macro_rules! reject {
    ($($method:ident($($arg:ty),*) -> $ret:ty;)*) => {
        $(
            fn $method(self, $(_: $arg),*) -> Result<$ret> {
                Err(Error::custom("expected date seconds"))
            }
        )*
    };
}

impl ser::Serializer for EpochSeconds {
    type Ok = f64;
    type Error = Error;

    type SerializeSeq = Impossible<f64, Error>;
    type SerializeTuple = Impossible<f64, Error>;
    type SerializeTupleStruct = Impossible<f64, Error>;
    type SerializeTupleVariant = Impossible<f64, Error>;
    type SerializeMap = Impossible<f64, Error>;
    type SerializeStruct = Impossible<f64, Error>;
    type SerializeStructVariant = Impossible<f64, Error>;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_f64(self, v: f64) -> Result<f64> {
        Ok(v)
    }

    reject! {
        serialize_bool(bool) -> f64;
        serialize_i8(i8) -> f64;
        serialize_i16(i16) -> f64;
        serialize_i32(i32) -> f64;
        serialize_i64(i64) -> f64;
        serialize_u8(u8) -> f64;
        serialize_u16(u16) -> f64;
        serialize_u32(u32) -> f64;
        serialize_u64(u64) -> f64;
        serialize_f32(f32) -> f64;
        serialize_char(char) -> f64;
        serialize_str(&str) -> f64;
        serialize_bytes(&[u8]) -> f64;
        serialize_none() -> f64;
        serialize_unit() -> f64;
        serialize_unit_struct(&'static str) -> f64;
        serialize_unit_variant(&'static str, u32, &'static str) -> f64;
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }

    fn serialize_some<T>(self, _value: &T) -> Result<f64>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::custom("expected date seconds"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, _value: &T) -> Result<f64>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::custom("expected date seconds"))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<f64>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::custom("expected date seconds"))
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{to_value, Value};
/// use std::collections::BTreeMap;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("alice", 3);
/// let value = to_value(&scores).unwrap();
/// assert_eq!(value.get("alice"), Some(&Value::Integer(3)));
/// ```
///
/// # Errors
///
/// Returns [`Error::IntegerOutOfRange`] for an integer outside `i32`,
/// [`Error::KeyMustBeString`] for a map key that is not a string, or whatever the
/// `Serialize` impl itself reports.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Line(i32, i32),
        Rect { w: u8, h: u8 },
    }

    #[test]
    fn test_struct_to_map() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("x"), Some(&Value::Integer(1)));
        assert_eq!(map.get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_integer_range() {
        assert!(matches!(to_value(&u32::MAX), Err(Error::IntegerOutOfRange(_))));
        assert!(matches!(to_value(&i64::MIN), Err(Error::IntegerOutOfRange(_))));
        assert_eq!(to_value(&(i32::MAX as u64)).unwrap(), Value::Integer(i32::MAX));
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Undefined);
        assert_eq!(to_value(&Some(5)).unwrap(), Value::Integer(5));
        assert_eq!(to_value(&()).unwrap(), Value::Undefined);
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));

        let circle = to_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle.get("Circle"), Some(&Value::Real(1.5)));

        let line = to_value(&Shape::Line(1, 2)).unwrap();
        assert_eq!(
            line.get("Line"),
            Some(&Value::Array(vec![Value::Integer(1), Value::Integer(2)]))
        );

        let rect = to_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect.get("Rect").unwrap();
        assert_eq!(inner.get("w"), Some(&Value::Integer(3)));
        assert_eq!(inner.get("h"), Some(&Value::Integer(4)));
    }

    #[test]
    fn test_non_string_keys_rejected() {
        let mut map = HashMap::new();
        map.insert(1, "one");
        assert_eq!(to_value(&map), Err(Error::KeyMustBeString));
    }

    #[test]
    fn test_bytes_become_binary() {
        struct Raw<'a>(&'a [u8]);

        impl Serialize for Raw<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_bytes(self.0)
            }
        }

        assert_eq!(to_value(&Raw(&[1, 2, 3])).unwrap(), Value::binary(vec![1, 2, 3]));
    }

    #[test]
    fn test_value_passes_through_unchanged() {
        let value = crate::llsd!({
            "blob": (Value::binary(vec![1, 2])),
            "id": (uuid::Uuid::from_bytes([0x5a; 16])),
            "home": (Uri::new("http://example.com")),
            "when": (Date::from_epoch_seconds(1_763_209_800.25).unwrap()),
            "nested": [(Value::binary(vec![])), "67e55044-10b1-426f-9247-bb680e5fe0c8"]
        });

        assert_eq!(to_value(&value).unwrap(), value);
        assert_eq!(
            to_value(&Value::binary(vec![1, 2])).unwrap(),
            Value::binary(vec![1, 2])
        );
    }

    #[test]
    fn test_plain_strings_are_not_classified() {
        let text = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(to_value(&text).unwrap(), Value::from(text));
    }
}
