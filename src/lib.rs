//! # serde_llsd
//!
//! A Serde-compatible library for LLSD (Linden Lab Structured Data), with a binary codec
//! and a JSON bridge.
//!
//! ## What is LLSD?
//!
//! LLSD is a self-describing, JSON-like data model used by virtual-world protocols. On top
//! of JSON's kinds it has 128-bit uuids, dates, uris and raw binary blobs, and it has a
//! compact length-prefixed binary encoding alongside its textual ones.
//!
//! ## Key Features
//!
//! - **Dynamic Value Model**: [`Value`] is a recursive enum over all eleven LLSD kinds
//! - **Binary Codec**: Bit-exact encode and decode of the tagged binary wire format
//! - **JSON Bridge**: Lossy but recoverable mapping to and from `serde_json`
//! - **Serde Compatible**: Convert any `Serialize`/`Deserialize` type with [`to_value`] and
//!   [`from_value`]
//! - **Hardened Decoding**: Bounded nesting, no allocation from untrusted counts, strict
//!   UTF-8, typed errors with byte offsets
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_llsd = "0.1"
//! ```
//!
//! ### Binary Round Trip
//!
//! ```rust
//! use serde_llsd::{from_slice, llsd, to_vec};
//!
//! let value = llsd!({
//!     "name": "Alice",
//!     "level": 12,
//!     "tags": ["builder", "scripter"]
//! });
//!
//! let bytes = to_vec(&value).unwrap();
//! assert_eq!(bytes[0], b'{');
//!
//! let back = from_slice(&bytes).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ### JSON Bridge
//!
//! ```rust
//! use serde_llsd::{json, Value};
//!
//! let value = json::from_str(r#"{"blob":"data:base64,AQIDBA==","when":"2025-11-15T12:30:00Z"}"#)
//!     .unwrap();
//! assert_eq!(value.get("blob").and_then(Value::as_binary), Some(&[1u8, 2, 3, 4][..]));
//! assert!(value.get("when").map_or(false, Value::is_date));
//!
//! let text = json::to_string(&value).unwrap();
//! assert_eq!(text, r#"{"blob":"data:base64,AQIDBA==","when":"2025-11-15T12:30:00Z"}"#);
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_llsd::{from_slice, from_value, to_value, to_vec};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Region {
//!     name: String,
//!     x: u16,
//!     y: u16,
//! }
//!
//! let region = Region { name: "Ahern".to_string(), x: 997, y: 1002 };
//! let bytes = to_vec(&to_value(&region).unwrap()).unwrap();
//! let back: Region = from_value(from_slice(&bytes).unwrap()).unwrap();
//! assert_eq!(back, region);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Encoding**: O(n) in the size of the value, one pass, one output buffer
//! - **Decoding**: O(n) single-pass recursive descent; allocation is bounded by the input
//!   length, never by declared counts
//! - **Maps**: `BTreeMap`-backed, so key order is canonical without a sort step
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All input slicing is bounds-checked
//! - Malformed input is reported as an [`Error`], never a panic
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, encode and decode entry points and container
//! boundaries emit `tracing` events at debug and trace level. Without it the calls compile
//! to nothing.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the wire layout and JSON mapping.

mod tracing_macros;

pub mod binary;
pub mod date;
pub mod de;
pub mod error;
pub mod format;
pub mod json;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use binary::{BinaryDecoder, BinaryEncoder};
pub use date::Date;
pub use de::{from_value, ValueDeserializer};
pub use error::{Error, Result};
pub use map::LlsdMap;
pub use options::LlsdOptions;
pub use ser::{to_value, ValueSerializer};
pub use value::{Kind, Uri, Value};

use std::io;

/// Encode a value in the LLSD binary format.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{to_vec, Value};
///
/// let bytes = to_vec(&Value::Integer(258)).unwrap();
/// assert_eq!(bytes, b"i\x00\x00\x01\x02");
/// ```
///
/// # Errors
///
/// Returns [`Error::LengthOverflow`] if any string, blob or container is too long for the
/// format's 32-bit length fields.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_vec_with_options(value, &LlsdOptions::default())
}

/// Encode a value in the LLSD binary format with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{to_vec_with_options, LlsdOptions, Value};
///
/// let options = LlsdOptions::new().with_header(true);
/// let bytes = to_vec_with_options(&Value::Undefined, &options).unwrap();
/// assert_eq!(bytes, b"<?llsd/binary?>\n!");
/// ```
///
/// # Errors
///
/// As for [`to_vec`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(value: &Value, options: &LlsdOptions) -> Result<Vec<u8>> {
    let mut encoder = BinaryEncoder::with_options(options);
    encoder.encode_value(value)?;
    Ok(encoder.into_inner())
}

/// Encode a value in the LLSD binary format to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{to_writer, Value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Value::Boolean(true)).unwrap();
/// assert_eq!(buffer, b"1");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, value, &LlsdOptions::default())
}

/// Encode a value in the LLSD binary format to a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    value: &Value,
    options: &LlsdOptions,
) -> Result<()>
where
    W: io::Write,
{
    let bytes = to_vec_with_options(value, options)?;
    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decode one value from a complete LLSD binary document.
///
/// A leading `<?llsd/binary?>` header is skipped. The whole slice must be consumed.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{from_slice, Value};
///
/// let value = from_slice(b"[\x00\x00\x00\x02i\x00\x00\x00\x01i\x00\x00\x00\x02]").unwrap();
/// assert_eq!(value, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or truncated, nests deeper than the default
/// limit, or has bytes left after the value. Errors carry the byte offset at which
/// decoding failed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Value> {
    from_slice_with_options(v, &LlsdOptions::default())
}

/// Decode one value from a complete LLSD binary document with custom options.
///
/// # Errors
///
/// As for [`from_slice`], with the nesting limit taken from `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options(v: &[u8], options: &LlsdOptions) -> Result<Value> {
    let mut decoder = BinaryDecoder::with_options(v, options);
    let value = decoder.decode_value()?;
    decoder.end()?;
    Ok(value)
}

/// Decode one value from an I/O stream of LLSD binary.
///
/// The reader is read to its end before decoding starts.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::{from_reader, Value};
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"s\x00\x00\x00\x05hello");
/// assert_eq!(from_reader(cursor).unwrap(), Value::from("hello"));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the bytes do not form a valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Value>
where
    R: io::Read,
{
    from_reader_with_options(reader, &LlsdOptions::default())
}

/// Decode one value from an I/O stream of LLSD binary with custom options.
///
/// # Errors
///
/// Returns an error if reading fails or the bytes do not form a valid document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R>(mut reader: R, options: &LlsdOptions) -> Result<Value>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice_with_options(&bytes, options)
}
