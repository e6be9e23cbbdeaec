//! Error types for LLSD encoding and decoding.
//!
//! Every fallible operation in this crate returns [`Result<T>`], whose error side is the
//! single [`Error`] enum below.
//!
//! ## Error Categories
//!
//! - **Malformed binary input**: unknown tag bytes, truncated payloads, negative lengths,
//!   missing closing tags. Each carries the byte offset where decoding stopped.
//! - **Malformed JSON input**: errors from the JSON tokenizer, undecodable blob payloads,
//!   and numbers the value model cannot hold.
//! - **Contract violations**: building a value the wire format cannot carry, such as an
//!   integer wider than 32 bits or a date outside the calendar range.
//! - **Type mismatches**: extracting the wrong kind out of a [`Value`](crate::Value).
//!
//! Decoding never recovers from an error: the whole parse is abandoned and the caller
//! must start again on fresh input.
//!
//! ## Examples
//!
//! ```rust
//! use serde_llsd::{from_slice, Error};
//!
//! let result = from_slice(b"i\x00\x00");
//! assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
//!
//! if let Err(err) = result {
//!     assert!(err.is_eof());
//!     assert_eq!(err.offset(), Some(1));
//! }
//! ```

use crate::value::Kind;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while building, encoding or decoding LLSD.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Input ended before a value or declared payload was complete
    #[error("Unexpected end of input at byte {offset}: expected {expected}")]
    UnexpectedEof { offset: usize, expected: String },

    /// A byte that is not one of the binary type tags
    #[error("Invalid type tag {} at byte {offset}", display_tag(.tag))]
    InvalidTag { offset: usize, tag: u8 },

    /// A length or count prefix below zero
    #[error("Negative length {length} at byte {offset}")]
    NegativeLength { offset: usize, length: i32 },

    /// A container was not closed by its matching tag
    #[error("Expected '{expected}' to close container at byte {offset}, found {}", display_tag(.found))]
    MismatchedClose {
        offset: usize,
        expected: char,
        found: u8,
    },

    /// A map entry that does not start with the `k` key marker
    #[error("Expected map key marker 'k' at byte {offset}, found {}", display_tag(.found))]
    ExpectedKey { offset: usize, found: u8 },

    /// String, URI or key payload that is not valid UTF-8
    #[error("Invalid UTF-8 in string payload at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// Containers nested deeper than the configured limit
    #[error("Nesting depth limit of {limit} exceeded at byte {offset}")]
    DepthLimitExceeded { offset: usize, limit: usize },

    /// Bytes left over after a complete top-level value
    #[error("Trailing data after value at byte {offset}")]
    TrailingData { offset: usize },

    /// A number that does not fit the 32-bit integer kind
    #[error("Integer {0} is outside the 32-bit signed range")]
    IntegerOutOfRange(String),

    /// Seconds that cannot be represented as a calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A payload or container too large for a 32-bit length prefix
    #[error("Length {length} does not fit in a 32-bit length prefix")]
    LengthOverflow { length: usize },

    /// Error reported by the JSON tokenizer
    #[error("JSON error: {0}")]
    Json(String),

    /// A JSON node the value model has no kind for
    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(String),

    /// A `data:base64,` payload that could not be decoded
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// A value of one kind was requested as another
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// Map keys produced by a `Serialize` impl must be strings
    #[error("Map keys must be strings")]
    KeyMustBeString,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unexpected end-of-input error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::Error;
    ///
    /// let err = Error::unexpected_eof(7, "4-byte length");
    /// assert!(err.to_string().contains("byte 7"));
    /// ```
    pub fn unexpected_eof(offset: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            offset,
            expected: expected.to_string(),
        }
    }

    /// Creates an integer range error from any displayable number.
    pub fn integer_out_of_range<T: fmt::Display>(value: T) -> Self {
        Error::IntegerOutOfRange(value.to_string())
    }

    /// Creates an invalid date error.
    pub fn invalid_date<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidDate(msg.to_string())
    }

    /// Creates a type mismatch error when a value holds a different kind than requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::{Error, Kind};
    ///
    /// let err = Error::type_mismatch(Kind::Integer, Kind::String);
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Byte offset into the binary input where decoding failed, if this error came from
    /// the binary decoder.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEof { offset, .. }
            | Error::InvalidTag { offset, .. }
            | Error::NegativeLength { offset, .. }
            | Error::MismatchedClose { offset, .. }
            | Error::ExpectedKey { offset, .. }
            | Error::InvalidUtf8 { offset }
            | Error::DepthLimitExceeded { offset, .. }
            | Error::TrailingData { offset } => Some(*offset),
            _ => None,
        }
    }

    /// Returns `true` if the input was truncated.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }

    /// Returns `true` if the input bytes or text were malformed, as opposed to
    /// well-formed input carrying a value the model cannot hold.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::InvalidTag { .. }
                | Error::NegativeLength { .. }
                | Error::MismatchedClose { .. }
                | Error::ExpectedKey { .. }
                | Error::InvalidUtf8 { .. }
                | Error::TrailingData { .. }
                | Error::Json(_)
                | Error::InvalidBase64(_)
        )
    }
}

fn display_tag(tag: &u8) -> DisplayTag {
    DisplayTag(*tag)
}

/// Renders a tag byte as a quoted character when printable, as hex otherwise.
struct DisplayTag(u8);

impl fmt::Display for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
