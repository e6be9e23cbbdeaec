//! LLSD Format Reference
//!
//! This module documents the two LLSD encodings implemented by this library.
//!
//! # Overview
//!
//! LLSD (Linden Lab Structured Data) is a self-describing data model with eleven kinds:
//! undefined, boolean, integer, real, string, uuid, date, uri, binary, array and map.
//! It is JSON-like, with four extra scalar kinds that JSON has no direct spelling for.
//!
//! # Binary Encoding
//!
//! Each value is one ASCII tag byte followed by a tag-specific payload. There is no
//! padding and no alignment. Multi-byte numbers are big-endian, with one exception.
//!
//! | Tag | Kind | Payload |
//! |-----|------|---------|
//! | `!` | undefined | none |
//! | `1` | boolean `true` | none |
//! | `0` | boolean `false` | none |
//! | `i` | integer | 4 bytes, big-endian two's complement |
//! | `r` | real | 8 bytes, big-endian IEEE-754 double |
//! | `s` | string | 4-byte big-endian length `n`, then `n` bytes of UTF-8 |
//! | `l` | uri | same shape as string |
//! | `u` | uuid | 16 raw bytes |
//! | `d` | date | 8 bytes, **little-endian** IEEE-754 double of seconds since the Unix epoch |
//! | `b` | binary | 4-byte big-endian length `n`, then `n` raw bytes |
//! | `[` | array | 4-byte big-endian count `n`, `n` values, then `]` |
//! | `{` | map | 4-byte big-endian count `n`, `n` entries, then `}` |
//!
//! A map entry is the byte `k`, a length-prefixed UTF-8 key, then the value:
//!
//! ```text
//! {  00 00 00 01  k  00 00 00 03 "key"  i 00 00 00 01  }
//! ```
//!
//! Lengths and counts are signed on the wire. Negative values are rejected, and lengths
//! above `i32::MAX` cannot be written.
//!
//! ## Header
//!
//! A document may begin with the line `<?llsd/binary?>\n`. Decoding skips it when
//! present; encoding writes it only when [`LlsdOptions::header`](crate::LlsdOptions) is
//! set.
//!
//! ## Determinism
//!
//! Map entries are always written in ascending byte order of their keys, so equal
//! values encode to identical bytes. When a decoded map repeats a key, the later entry
//! wins.
//!
//! # JSON Encoding
//!
//! | Kind | JSON |
//! |------|------|
//! | undefined | `null` |
//! | boolean | `true` / `false` |
//! | integer | number |
//! | real | number, or `null` when not finite |
//! | string | string |
//! | uuid | `"xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"` (lower case) |
//! | date | `"YYYY-MM-DDTHH:MM:SSZ"` (UTC, whole seconds) |
//! | uri | string |
//! | binary | `"data:base64,"` followed by padded standard base64 |
//! | array | array |
//! | map | object, keys ascending |
//!
//! Decoding classifies strings by shape, first match wins: blob prefix, uuid shape,
//! date shape, then plain string. Uris therefore come back as strings, and a string that
//! merely looks like a uuid comes back as a uuid.
//!
//! Any string with the date shape is a date. Fields past their calendar range carry over
//! the way C's `timegm` does: `"2025-02-30T00:00:00Z"` reads as 2025-03-02 and the leap
//! second `"2016-12-31T23:59:60Z"` as 2017-01-01T00:00:00Z.
//!
//! Integral JSON numbers become integers and must fit in 32 bits. Numbers with a
//! fraction or exponent become reals.
//!
//! # Limits
//!
//! - Integers are 32-bit; wider Rust integers are range-checked on the way in.
//! - Dates must be finite and within the range `chrono` can represent, roughly 262,000
//!   years either side of the epoch. The wire format itself accepts any double, so a `d`
//!   payload holding NaN, an infinity or a larger magnitude is rejected by the decoder
//!   with [`Error::InvalidDate`](crate::Error::InvalidDate) and the whole decode fails.
//!   JSON text keeps whole seconds only; the binary encoding keeps the full double.
//! - Binary decoding stops at [`LlsdOptions::max_depth`](crate::LlsdOptions) nested
//!   containers (128 by default).
//!
//! # Not Supported
//!
//! The LLSD XML and notation encodings are not implemented.

// This module contains only documentation; no implementation code
