//! The LLSD binary wire format.
//!
//! Every value is one ASCII tag byte followed by a tag-specific payload, with no padding
//! or alignment. See [`crate::format`] for the full grammar.
//!
//! Most callers should use [`crate::to_vec`] and [`crate::from_slice`]. The
//! [`BinaryEncoder`] and [`BinaryDecoder`] types are exposed for writing several values
//! into one buffer or reading them back one at a time:
//!
//! ```rust
//! use serde_llsd::binary::{BinaryDecoder, BinaryEncoder};
//! use serde_llsd::Value;
//!
//! let mut encoder = BinaryEncoder::new();
//! encoder.encode_value(&Value::from(1)).unwrap();
//! encoder.encode_value(&Value::from("two")).unwrap();
//! let bytes = encoder.into_inner();
//!
//! let mut decoder = BinaryDecoder::new(&bytes);
//! assert_eq!(decoder.decode_value().unwrap(), Value::from(1));
//! assert_eq!(decoder.decode_value().unwrap(), Value::from("two"));
//! assert!(decoder.end().is_ok());
//! ```

mod decode;
mod encode;

pub use decode::BinaryDecoder;
pub use encode::BinaryEncoder;

/// Optional first line of a binary LLSD document.
pub const HEADER: &[u8] = b"<?llsd/binary?>\n";

pub(crate) mod tag {
    pub const UNDEFINED: u8 = b'!';
    pub const TRUE: u8 = b'1';
    pub const FALSE: u8 = b'0';
    pub const INTEGER: u8 = b'i';
    pub const REAL: u8 = b'r';
    pub const STRING: u8 = b's';
    pub const UUID: u8 = b'u';
    pub const URI: u8 = b'l';
    pub const DATE: u8 = b'd';
    pub const BINARY: u8 = b'b';
    pub const ARRAY_BEGIN: u8 = b'[';
    pub const ARRAY_END: u8 = b']';
    pub const MAP_BEGIN: u8 = b'{';
    pub const MAP_END: u8 = b'}';
    pub const MAP_KEY: u8 = b'k';
}
