//! Dynamic value representation for LLSD data.
//!
//! This module provides the [`Value`] enum which represents any LLSD value, the [`Kind`]
//! tag naming each variant, and the [`Uri`] newtype.
//!
//! ## Ownership
//!
//! A `Value` owns its children outright; the data model is a tree with no sharing.
//!
//! - `clone()` is a full deep copy. Every nested array and map is freshly allocated, so
//!   mutating a clone never shows through to the original.
//! - Moving a `Value` hands over its heap payload without copying it.
//!   [`Value::take`] does the same from behind a `&mut`, leaving [`Value::Undefined`].
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_llsd::{llsd, Uri, Value};
//!
//! let undef = Value::Undefined;
//! let boolean = Value::from(true);
//! let integer = Value::from(42);
//! let text = Value::from("hello");
//! let uri = Value::from(Uri::new("http://example.com"));
//! let blob = Value::binary(vec![1, 2, 3]);
//!
//! let obj = llsd!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_map());
//! ```
//!
//! ### Wider Integers
//!
//! The integer kind is exactly 32 bits. Wider inputs are checked, never truncated:
//!
//! ```rust
//! use serde_llsd::Value;
//!
//! assert!(Value::try_from(7_i64).is_ok());
//! assert!(Value::try_from(1_i64 << 40).is_err());
//! ```
//!
//! ### Extracting Values
//!
//! Accessors only answer for their own kind; an integer is never read as a real:
//!
//! ```rust
//! use serde_llsd::Value;
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_i32(), Some(42));
//! assert_eq!(value.as_f64(), None);
//!
//! let num: i32 = i32::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::date::Date;
use crate::{json, ser, Error, LlsdMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A dynamically-typed representation of any LLSD value.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{Kind, Value};
///
/// let undef = Value::Undefined;
/// let num = Value::Integer(42);
/// let text = Value::String("hello".to_string());
///
/// assert!(undef.is_undefined());
/// assert_eq!(num.kind(), Kind::Integer);
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Boolean(bool),
    Integer(i32),
    Real(f64),
    String(String),
    Uuid(Uuid),
    Date(Date),
    Uri(Uri),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    Map(LlsdMap),
}

/// The kind of value a [`Value`] holds, named as LLSD names its types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Boolean,
    Integer,
    Real,
    String,
    Uuid,
    Date,
    Uri,
    Binary,
    Array,
    Map,
}

impl Kind {
    /// Returns the LLSD type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Undefined => "undef",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::String => "string",
            Kind::Uuid => "uuid",
            Kind::Date => "date",
            Kind::Uri => "uri",
            Kind::Binary => "binary",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URI. Textually a string, but a distinct kind on the binary wire.
///
/// No syntax validation is applied.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Uri(uri.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Uri(value)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Uri(value.to_string())
    }
}

impl Value {
    /// Creates a binary blob value.
    ///
    /// `Vec<u8>` has no `From` conversion so that a byte vector is never mistaken for an
    /// array of integers.
    #[must_use]
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Binary(bytes.into())
    }

    /// Creates a URI value.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Value::Uri(Uri::new(uri))
    }

    /// Returns the kind of value held.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Real(_) => Kind::Real,
            Value::String(_) => Kind::String,
            Value::Uuid(_) => Kind::Uuid,
            Value::Date(_) => Kind::Date,
            Value::Uri(_) => Kind::Uri,
            Value::Binary(_) => Kind::Binary,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Moves the value out, leaving [`Value::Undefined`] in its place.
    ///
    /// Container payloads are transferred, not copied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::{llsd, Value};
    ///
    /// let mut source = llsd!([1, 2, 3]);
    /// let moved = source.take();
    ///
    /// assert!(source.is_undefined());
    /// assert_eq!(moved.as_array().map(Vec::len), Some(3));
    /// ```
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_uuid(&self) -> bool {
        matches!(self, Value::Uuid(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Value::Uri(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer, returns it. Reals are not converted.
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a real, returns it. Integers are not converted.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// If the value is a string, returns it. URIs are a different kind and return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::uri("http://example.com").as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Value::Uri(u) => Some(u),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&LlsdMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut LlsdMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if the value is a map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::llsd;
    ///
    /// let value = llsd!({ "answer": 42 });
    /// assert_eq!(value.get("answer").and_then(|v| v.as_i32()), Some(42));
    /// assert!(value.get("question").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

/// Writes the compact JSON-bridge form of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", json::to_json(self))
    }
}

// The serde data model has no uuid, date, uri or blob kinds, so those are written in
// their JSON-bridge string forms and recovered by the same string heuristics. Each is
// wrapped in a private newtype name so `to_value` can restore the exact kind.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::String(s) => serializer.serialize_str(s),
            Value::Uuid(u) => serializer
                .serialize_newtype_struct(ser::UUID_TOKEN, &u.hyphenated().to_string()),
            Value::Date(d) => serializer.serialize_newtype_struct(ser::DATE_TOKEN, &DateForm(*d)),
            Value::Uri(u) => serializer.serialize_newtype_struct(ser::URI_TOKEN, u.as_str()),
            Value::Binary(b) => {
                serializer.serialize_newtype_struct(ser::BINARY_TOKEN, &json::encode_blob(b))
            }
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

// Canonical text for human-readable formats, raw epoch seconds otherwise.
struct DateForm(Date);

impl Serialize for DateForm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(&self.0)
        } else {
            serializer.serialize_f64(self.0.epoch_seconds())
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid LLSD value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Value::try_from(value).map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                Value::try_from(value).map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Real(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E>
            where
                E: de::Error,
            {
                json::classify_str(value).map_err(E::custom)
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E>
            where
                E: de::Error,
            {
                json::classify_string(value).map_err(E::custom)
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E> {
                Ok(Value::Binary(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E> {
                Ok(Value::Binary(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Undefined)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Undefined)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = LlsdMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Map(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(Error::type_mismatch(Kind::Boolean, other.kind())),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(Error::type_mismatch(Kind::Integer, other.kind())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Real(r) => Ok(r),
            other => Err(Error::type_mismatch(Kind::Real, other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch(Kind::String, other.kind())),
        }
    }
}

impl TryFrom<Value> for Uuid {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Uuid(u) => Ok(u),
            other => Err(Error::type_mismatch(Kind::Uuid, other.kind())),
        }
    }
}

impl TryFrom<Value> for Date {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(Error::type_mismatch(Kind::Date, other.kind())),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Binary(b) => Ok(b),
            other => Err(Error::type_mismatch(Kind::Binary, other.kind())),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(i32::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(i32::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(i32::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(i32::from(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(Date::from_datetime(value))
    }
}

impl From<Uri> for Value {
    fn from(value: Uri) -> Self {
        Value::Uri(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<LlsdMap> for Value {
    fn from(value: LlsdMap) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

macro_rules! impl_try_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for Value {
                type Error = Error;

                fn try_from(value: $ty) -> crate::Result<Self> {
                    i32::try_from(value)
                        .map(Value::Integer)
                        .map_err(|_| Error::integer_out_of_range(value))
                }
            }
        )*
    };
}

impl_try_from_wide_int!(i64, i128, isize, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i32() {
        let result: i32 = TryFrom::try_from(Value::Integer(42)).unwrap();
        assert_eq!(result, 42);

        let err = i32::try_from(Value::Real(42.0)).unwrap_err();
        assert_eq!(err, Error::type_mismatch(Kind::Integer, Kind::Real));
    }

    #[test]
    fn test_tryfrom_f64_does_not_widen() {
        let result: f64 = TryFrom::try_from(Value::Real(3.5)).unwrap();
        assert_eq!(result, 3.5);
        assert!(f64::try_from(Value::Integer(3)).is_err());
    }

    #[test]
    fn test_tryfrom_string_rejects_uri() {
        let result: String = TryFrom::try_from(Value::from("hello")).unwrap();
        assert_eq!(result, "hello");
        assert!(String::try_from(Value::uri("http://example.com")).is_err());
    }

    #[test]
    fn test_wide_integers_checked() {
        assert_eq!(Value::try_from(i64::from(i32::MAX)), Ok(Value::Integer(i32::MAX)));
        assert_eq!(Value::try_from(i64::from(i32::MIN)), Ok(Value::Integer(i32::MIN)));
        assert!(matches!(
            Value::try_from(i64::from(i32::MAX) + 1),
            Err(Error::IntegerOutOfRange(_))
        ));
        assert!(Value::try_from(u32::MAX).is_err());
        assert!(Value::try_from(u64::MAX).is_err());
        assert_eq!(Value::try_from(5usize), Ok(Value::Integer(5)));
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(42i32), Value::Integer(42));
        assert_eq!(Value::from(200u8), Value::Integer(200));
        assert_eq!(Value::from(3.5f64), Value::Real(3.5));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Undefined);
        assert_eq!(Value::from(Some(1)), Value::Integer(1));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Undefined.kind().to_string(), "undef");
        assert_eq!(Value::binary(vec![1]).kind(), Kind::Binary);
        assert_eq!(Value::uri("x").kind().as_str(), "uri");
        assert_eq!(Value::Map(LlsdMap::new()).kind(), Kind::Map);
    }

    #[test]
    fn test_accessors_do_not_cross_kinds() {
        let uri = Value::uri("http://example.com");
        assert_eq!(uri.as_uri().map(Uri::as_str), Some("http://example.com"));
        assert_eq!(uri.as_str(), None);

        let int = Value::from(1);
        assert_eq!(int.as_bool(), None);
        assert_eq!(int.as_f64(), None);
        assert_eq!(int.as_i32(), Some(1));
    }

    #[test]
    fn test_take_leaves_undefined() {
        let mut value = Value::Array(vec![Value::from(1), Value::from(2)]);
        let moved = value.take();
        assert!(value.is_undefined());
        assert_eq!(moved, Value::Array(vec![Value::from(1), Value::from(2)]));

        value = Value::from("reassigned");
        assert_eq!(value.as_str(), Some("reassigned"));
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut map = LlsdMap::new();
        map.insert("b".to_string(), Value::binary(vec![1, 2, 3]));
        map.insert("a".to_string(), Value::Undefined);
        assert_eq!(
            Value::Map(map).to_string(),
            r#"{"a":null,"b":"data:base64,AQID"}"#
        );
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_undefined(v: &Value) -> bool {
            v.is_undefined()
        }

        assert!(check_undefined(&Value::Undefined));
        assert!(!check_undefined(&Value::Boolean(false)));
    }
}
