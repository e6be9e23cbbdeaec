use super::{tag, HEADER};
use crate::date::Date;
use crate::tracing_macros::{debug, trace};
use crate::{Error, LlsdMap, LlsdOptions, Result, Value};
use uuid::Uuid;

/// Binary LLSD decoder over a byte slice.
///
/// Decoding is a single recursive-descent pass keyed on the tag byte. Containers read
/// exactly the number of children their header declares; the closing tag is then checked
/// but does not drive the loop.
///
/// Any error abandons the parse. The decoder's position is unspecified afterwards and it
/// should be dropped.
pub struct BinaryDecoder<'de> {
    input: &'de [u8],
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'de> BinaryDecoder<'de> {
    /// Creates a decoder with default options.
    ///
    /// A leading `<?llsd/binary?>` header line is skipped if present.
    pub fn new(input: &'de [u8]) -> Self {
        Self::with_options(input, &LlsdOptions::default())
    }

    pub fn with_options(input: &'de [u8], options: &LlsdOptions) -> Self {
        debug!(len = input.len(), "decoding binary LLSD");
        let mut decoder = BinaryDecoder {
            input,
            position: 0,
            depth: 0,
            max_depth: options.max_depth,
        };
        decoder.skip_header();
        decoder
    }

    /// Current byte offset into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` once every input byte has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Checks that no input is left over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingData`] if bytes remain.
    pub fn end(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(Error::TrailingData {
                offset: self.position,
            })
        }
    }

    /// Decodes the next complete value.
    ///
    /// # Errors
    ///
    /// Fails on an unknown tag, a truncated payload, a negative length or count, a
    /// missing closing tag, a map entry without its `k` marker, non-UTF-8 text, an
    /// unrepresentable date, or nesting beyond the configured depth.
    pub fn decode_value(&mut self) -> Result<Value> {
        let offset = self.position;
        let tag = self.read_u8("type tag")?;

        match tag {
            tag::UNDEFINED => Ok(Value::Undefined),
            tag::TRUE => Ok(Value::Boolean(true)),
            tag::FALSE => Ok(Value::Boolean(false)),
            tag::INTEGER => Ok(Value::Integer(self.read_i32_be("4-byte integer")?)),
            tag::REAL => Ok(Value::Real(f64::from_be_bytes(
                self.read_array("8-byte real")?,
            ))),
            tag::STRING => Ok(Value::String(self.read_string("string")?)),
            tag::URI => Ok(Value::uri(self.read_string("uri")?)),
            tag::UUID => Ok(Value::Uuid(Uuid::from_bytes(
                self.read_array("16-byte uuid")?,
            ))),
            tag::DATE => {
                // The one little-endian field in the format.
                let seconds = f64::from_le_bytes(self.read_array("8-byte date")?);
                Ok(Value::Date(Date::from_epoch_seconds(seconds)?))
            }
            tag::BINARY => {
                let len = self.read_length()?;
                let bytes = self.read_bytes(len, "binary payload")?;
                Ok(Value::Binary(bytes.to_vec()))
            }
            tag::ARRAY_BEGIN => self.decode_array(offset),
            tag::MAP_BEGIN => self.decode_map(offset),
            _ => Err(Error::InvalidTag { offset, tag }),
        }
    }

    fn decode_array(&mut self, offset: usize) -> Result<Value> {
        self.enter_container(offset)?;
        let count = self.read_length()?;
        trace!(offset, count, "decoding array");

        // Every element takes at least one byte, so never reserve more than what is left.
        let mut elements = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            elements.push(self.decode_value()?);
        }

        self.expect_close(tag::ARRAY_END)?;
        self.depth -= 1;
        Ok(Value::Array(elements))
    }

    fn decode_map(&mut self, offset: usize) -> Result<Value> {
        self.enter_container(offset)?;
        let count = self.read_length()?;
        trace!(offset, count, "decoding map");

        let mut map = LlsdMap::new();
        for _ in 0..count {
            let key_offset = self.position;
            let marker = self.read_u8("map key marker")?;
            if marker != tag::MAP_KEY {
                return Err(Error::ExpectedKey {
                    offset: key_offset,
                    found: marker,
                });
            }
            let key = self.read_string("map key")?;
            let value = self.decode_value()?;
            map.insert(key, value);
        }

        self.expect_close(tag::MAP_END)?;
        self.depth -= 1;
        Ok(Value::Map(map))
    }

    fn enter_container(&mut self, offset: usize) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                offset,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn expect_close(&mut self, close: u8) -> Result<()> {
        let offset = self.position;
        let found = self.read_u8("closing tag")?;
        if found != close {
            return Err(Error::MismatchedClose {
                offset,
                expected: close as char,
                found,
            });
        }
        Ok(())
    }

    fn skip_header(&mut self) {
        let line = &HEADER[..HEADER.len() - 1];
        if self.input.starts_with(line) {
            self.position = line.len();
            if self.input.get(self.position) == Some(&b'\n') {
                self.position += 1;
            }
            trace!(position = self.position, "skipped binary header");
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.position)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize, expected: &str) -> Result<&'de [u8]> {
        if len > self.remaining() {
            return Err(Error::unexpected_eof(self.position, expected));
        }
        let bytes = &self.input[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, expected: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, expected)?);
        Ok(out)
    }

    #[inline]
    fn read_u8(&mut self, expected: &str) -> Result<u8> {
        let [b] = self.read_array::<1>(expected)?;
        Ok(b)
    }

    #[inline]
    fn read_i32_be(&mut self, expected: &str) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array(expected)?))
    }

    /// Reads a 4-byte big-endian length or count, rejecting negatives before anything
    /// is allocated for them.
    fn read_length(&mut self) -> Result<usize> {
        let offset = self.position;
        let length = self.read_i32_be("4-byte length")?;
        usize::try_from(length).map_err(|_| Error::NegativeLength { offset, length })
    }

    fn read_string(&mut self, expected: &str) -> Result<String> {
        let len = self.read_length()?;
        let offset = self.position;
        let bytes = self.read_bytes(len, expected)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| Error::InvalidUtf8 { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<Value> {
        BinaryDecoder::new(bytes).decode_value()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(decode(b"!").unwrap(), Value::Undefined);
        assert_eq!(decode(b"1").unwrap(), Value::Boolean(true));
        assert_eq!(decode(b"0").unwrap(), Value::Boolean(false));
        assert_eq!(decode(b"i\x00\x00\x01\x02").unwrap(), Value::Integer(258));
        assert_eq!(decode(b"i\xff\xff\xff\xff").unwrap(), Value::Integer(-1));
    }

    #[test]
    fn test_date_is_little_endian() {
        let mut bytes = vec![b'd'];
        bytes.extend_from_slice(&1_763_209_800.0f64.to_le_bytes());
        let value = decode(&bytes).unwrap();
        assert_eq!(value.as_date().unwrap().to_string(), "2025-11-15T12:30:00Z");
    }

    #[test]
    fn test_date_rejects_unrepresentable_seconds() {
        for seconds in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e16] {
            let mut bytes = vec![b'[', 0, 0, 0, 1, b'd'];
            bytes.extend_from_slice(&seconds.to_le_bytes());
            bytes.push(b']');
            assert!(
                matches!(decode(&bytes), Err(Error::InvalidDate(_))),
                "{seconds}"
            );
        }
    }

    #[test]
    fn test_negative_length_rejected_before_reading() {
        let err = decode(b"s\xff\xff\xff\xff").unwrap_err();
        assert_eq!(
            err,
            Error::NegativeLength {
                offset: 1,
                length: -1
            }
        );

        let err = decode(b"b\x80\x00\x00\x00").unwrap_err();
        assert_eq!(
            err,
            Error::NegativeLength {
                offset: 1,
                length: i32::MIN
            }
        );
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = decode(b"[\xff\xff\xff\xfe]").unwrap_err();
        assert!(matches!(err, Error::NegativeLength { length: -2, .. }));
    }

    #[test]
    fn test_huge_count_does_not_preallocate() {
        // Declares two billion elements, then runs dry.
        let err = decode(b"[\x7f\xff\xff\xff!").unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn test_truncated_payload() {
        let err = decode(b"s\x00\x00\x00\x05hel").unwrap_err();
        assert_eq!(err, Error::unexpected_eof(5, "string"));
    }

    #[test]
    fn test_empty_input() {
        let err = decode(b"").unwrap_err();
        assert_eq!(err, Error::unexpected_eof(0, "type tag"));
    }

    #[test]
    fn test_invalid_tag() {
        let err = decode(b"[\x00\x00\x00\x01x]").unwrap_err();
        assert_eq!(err, Error::InvalidTag { offset: 5, tag: b'x' });
    }

    #[test]
    fn test_mismatched_close() {
        let err = decode(b"[\x00\x00\x00\x00}").unwrap_err();
        assert_eq!(
            err,
            Error::MismatchedClose {
                offset: 5,
                expected: ']',
                found: b'}'
            }
        );

        let err = decode(b"{\x00\x00\x00\x00").unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn test_map_requires_key_marker() {
        let err = decode(b"{\x00\x00\x00\x01s\x00\x00\x00\x01ai\x00\x00\x00\x01}").unwrap_err();
        assert_eq!(err, Error::ExpectedKey { offset: 5, found: b's' });
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let bytes = b"{\x00\x00\x00\x02k\x00\x00\x00\x01ai\x00\x00\x00\x01k\x00\x00\x00\x01ai\x00\x00\x00\x02}";
        let value = decode(bytes).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = decode(b"s\x00\x00\x00\x02\xff\xfe").unwrap_err();
        assert_eq!(err, Error::InvalidUtf8 { offset: 5 });
    }

    #[test]
    fn test_depth_limit() {
        let options = LlsdOptions::new().with_max_depth(2);
        let ok = b"[\x00\x00\x00\x01[\x00\x00\x00\x00]]";
        assert!(BinaryDecoder::with_options(ok, &options).decode_value().is_ok());

        let too_deep = b"[\x00\x00\x00\x01[\x00\x00\x00\x01[\x00\x00\x00\x00]]]";
        let err = BinaryDecoder::with_options(too_deep, &options)
            .decode_value()
            .unwrap_err();
        assert_eq!(err, Error::DepthLimitExceeded { offset: 10, limit: 2 });
    }

    #[test]
    fn test_header_skipped() {
        let mut decoder = BinaryDecoder::new(b"<?llsd/binary?>\ni\x00\x00\x00\x07");
        assert_eq!(decoder.position(), 16);
        assert_eq!(decoder.decode_value().unwrap(), Value::Integer(7));
        assert!(decoder.end().is_ok());

        let mut decoder = BinaryDecoder::new(b"<?llsd/binary?>!");
        assert_eq!(decoder.decode_value().unwrap(), Value::Undefined);
    }

    #[test]
    fn test_end_reports_trailing_data() {
        let mut decoder = BinaryDecoder::new(b"!!");
        decoder.decode_value().unwrap();
        assert_eq!(decoder.end(), Err(Error::TrailingData { offset: 1 }));
    }
}
