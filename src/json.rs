//! The JSON bridge between [`Value`] and `serde_json`.
//!
//! JSON has fewer kinds than LLSD, so encoding is lossy: uuids, dates and uris become
//! plain strings and blobs become `"data:base64,"`-prefixed strings. Decoding recovers
//! the richer kinds from string shape, checked in a fixed order:
//!
//! 1. a `data:base64,` prefix decodes as [`Value::Binary`]
//! 2. a lower-case `8-4-4-4-12` hex string decodes as [`Value::Uuid`]
//! 3. a `YYYY-MM-DDTHH:MM:SSZ` string naming a real UTC instant decodes as [`Value::Date`]
//! 4. anything else stays a [`Value::String`]
//!
//! Uris always come back as strings.
//!
//! ## Examples
//!
//! ```rust
//! use serde_llsd::{json, llsd, Value};
//!
//! let value = llsd!({
//!     "blob": (Value::binary(vec![1, 2, 3])),
//!     "count": 3
//! });
//! let text = json::to_string(&value).unwrap();
//! assert_eq!(text, r#"{"blob":"data:base64,AQID","count":3}"#);
//!
//! let back = json::from_str(&text).unwrap();
//! assert_eq!(back, value);
//! ```

use crate::date::{self, Date};
use crate::tracing_macros::trace;
use crate::{Error, LlsdMap, LlsdOptions, Result, Value};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Number};
use uuid::Uuid;

/// Marker that introduces a blob in JSON text.
pub const BLOB_PREFIX: &str = "data:base64,";

// Accepts unpadded input with stray low bits; padding is stripped before decoding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Converts a value to a `serde_json` tree.
///
/// Never fails. Non-finite reals become `null`. Object members are inserted in ascending
/// key order.
#[must_use]
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Undefined => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number(Number::from(*i)),
        Value::Real(r) => {
            Number::from_f64(*r).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Uuid(u) => serde_json::Value::String(u.hyphenated().to_string()),
        Value::Date(d) => serde_json::Value::String(d.to_string()),
        Value::Uri(u) => serde_json::Value::String(u.as_str().to_string()),
        Value::Binary(b) => serde_json::Value::String(encode_blob(b)),
        Value::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(to_json).collect())
        }
        Value::Map(map) => {
            let mut object = Map::new();
            for (key, value) in map {
                object.insert(key.clone(), to_json(value));
            }
            serde_json::Value::Object(object)
        }
    }
}

/// Converts a `serde_json` tree to a value, recovering uuid, date and blob kinds from
/// string shape.
///
/// # Errors
///
/// Returns [`Error::IntegerOutOfRange`] for an integral number outside `i32`,
/// [`Error::InvalidBase64`] for an undecodable blob, and [`Error::UnsupportedJson`] for a
/// number with no numeric reading.
pub fn from_json(json: serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Undefined),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => from_number(&n),
        serde_json::Value::String(s) => classify_string(s),
        serde_json::Value::Array(elements) => elements
            .into_iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        serde_json::Value::Object(object) => {
            let mut map = LlsdMap::new();
            for (key, value) in object {
                map.insert(key, from_json(value)?);
            }
            Ok(Value::Map(map))
        }
    }
}

fn from_number(n: &Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        Value::try_from(i)
    } else if let Some(u) = n.as_u64() {
        Value::try_from(u)
    } else if let Some(f) = n.as_f64() {
        Ok(Value::Real(f))
    } else {
        Err(Error::UnsupportedJson(format!("number {n}")))
    }
}

/// Serializes a value as compact JSON text.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{json, llsd};
///
/// let value = llsd!({"b": [1, "two"], "a": null});
/// assert_eq!(json::to_string(&value).unwrap(), r#"{"a":null,"b":[1,"two"]}"#);
/// ```
///
/// # Errors
///
/// Only if the underlying writer fails, which cannot happen for an in-memory string.
pub fn to_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(&to_json(value))?)
}

/// Serializes a value as indented JSON text.
///
/// # Errors
///
/// As for [`to_string`].
pub fn to_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(value))?)
}

/// Serializes a value as JSON text, pretty-printed if [`LlsdOptions::pretty`] is set.
///
/// # Errors
///
/// As for [`to_string`].
pub fn to_string_with_options(value: &Value, options: &LlsdOptions) -> Result<String> {
    if options.pretty {
        to_string_pretty(value)
    } else {
        to_string(value)
    }
}

/// Parses JSON text into a value.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{json, Value};
///
/// let value = json::from_str(r#"{"when":"2025-11-15T12:30:00Z"}"#).unwrap();
/// assert!(value.get("when").unwrap().is_date());
/// ```
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed text, otherwise as for [`from_json`].
pub fn from_str(s: &str) -> Result<Value> {
    trace!(len = s.len(), "decoding JSON text");
    from_json(serde_json::from_str(s)?)
}

/// Parses UTF-8 JSON bytes into a value.
///
/// # Errors
///
/// As for [`from_str`].
pub fn from_slice(v: &[u8]) -> Result<Value> {
    trace!(len = v.len(), "decoding JSON bytes");
    from_json(serde_json::from_slice(v)?)
}

/// Renders a blob in its prefixed base64 form.
pub(crate) fn encode_blob(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(BLOB_PREFIX.len() + (bytes.len() + 2) / 3 * 4);
    out.push_str(BLOB_PREFIX);
    STANDARD.encode_string(bytes, &mut out);
    out
}

/// Decodes the base64 part of a blob string, skipping characters outside the alphabet
/// and stopping at the first `=`.
fn decode_blob(payload: &str) -> Result<Vec<u8>> {
    let mut cleaned: Vec<u8> = payload
        .bytes()
        .take_while(|&b| b != b'=')
        .filter(|&b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
        .collect();
    // A lone trailing sextet carries no complete byte.
    if cleaned.len() % 4 == 1 {
        cleaned.pop();
    }
    LENIENT_BASE64
        .decode(&cleaned)
        .map_err(|e| Error::InvalidBase64(e.to_string()))
}

/// Classifies a JSON string by shape, borrowing.
pub(crate) fn classify_str(s: &str) -> Result<Value> {
    match classify(s)? {
        Some(value) => Ok(value),
        None => Ok(Value::String(s.to_string())),
    }
}

/// Classifies a JSON string by shape, reusing its allocation when it stays a string.
pub(crate) fn classify_string(s: String) -> Result<Value> {
    match classify(&s)? {
        Some(value) => Ok(value),
        None => Ok(Value::String(s)),
    }
}

fn classify(s: &str) -> Result<Option<Value>> {
    if let Some(payload) = s.strip_prefix(BLOB_PREFIX) {
        return decode_blob(payload).map(|bytes| Some(Value::Binary(bytes)));
    }
    if is_uuid_shape(s) {
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(Some(Value::Uuid(uuid)));
        }
    }
    if date::is_canonical_shape(s) {
        return Date::parse(s).map(|date| Some(Value::Date(date)));
    }
    Ok(None)
}

// Lower-case hyphenated form only; braces, urns and upper case stay strings.
fn is_uuid_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 36
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_digit() || (b'a'..=b'f').contains(&b),
        })
}
