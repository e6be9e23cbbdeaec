use super::{tag, HEADER};
use crate::tracing_macros::{debug, trace};
use crate::{Error, LlsdOptions, Result, Value};

/// Binary LLSD encoder writing into an owned buffer.
///
/// Output is deterministic: map entries are written in ascending key order, so equal
/// values always produce identical bytes.
#[derive(Debug, Default)]
pub struct BinaryEncoder {
    output: Vec<u8>,
}

impl BinaryEncoder {
    pub fn new() -> Self {
        BinaryEncoder { output: Vec::new() }
    }

    /// Creates an encoder, writing the `<?llsd/binary?>` header first if
    /// [`LlsdOptions::header`] is set.
    pub fn with_options(options: &LlsdOptions) -> Self {
        debug!(header = options.header, "encoding binary LLSD");
        let mut encoder = BinaryEncoder::new();
        if options.header {
            encoder.output.extend_from_slice(HEADER);
        }
        encoder
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    /// Appends the encoding of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthOverflow`] if a string, uri, key, blob, array, or map is too
    /// long for the format's signed 32-bit length field. Whatever was written before the
    /// failure stays in the buffer.
    pub fn encode_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Undefined => self.output.push(tag::UNDEFINED),
            Value::Boolean(true) => self.output.push(tag::TRUE),
            Value::Boolean(false) => self.output.push(tag::FALSE),
            Value::Integer(i) => {
                self.output.push(tag::INTEGER);
                self.output.extend_from_slice(&i.to_be_bytes());
            }
            Value::Real(r) => {
                self.output.push(tag::REAL);
                self.output.extend_from_slice(&r.to_be_bytes());
            }
            Value::String(s) => {
                self.output.push(tag::STRING);
                self.write_str(s)?;
            }
            Value::Uri(uri) => {
                self.output.push(tag::URI);
                self.write_str(uri.as_str())?;
            }
            Value::Uuid(uuid) => {
                self.output.push(tag::UUID);
                self.output.extend_from_slice(uuid.as_bytes());
            }
            Value::Date(date) => {
                self.output.push(tag::DATE);
                self.output
                    .extend_from_slice(&date.epoch_seconds().to_le_bytes());
            }
            Value::Binary(bytes) => {
                self.output.push(tag::BINARY);
                self.write_length(bytes.len())?;
                self.output.extend_from_slice(bytes);
            }
            Value::Array(elements) => {
                trace!(count = elements.len(), "encoding array");
                self.output.push(tag::ARRAY_BEGIN);
                self.write_length(elements.len())?;
                for element in elements {
                    self.encode_value(element)?;
                }
                self.output.push(tag::ARRAY_END);
            }
            Value::Map(map) => {
                trace!(count = map.len(), "encoding map");
                self.output.push(tag::MAP_BEGIN);
                self.write_length(map.len())?;
                for (key, value) in map {
                    self.output.push(tag::MAP_KEY);
                    self.write_str(key)?;
                    self.encode_value(value)?;
                }
                self.output.push(tag::MAP_END);
            }
        }
        Ok(())
    }

    fn write_length(&mut self, length: usize) -> Result<()> {
        let length = i32::try_from(length).map_err(|_| Error::LengthOverflow { length })?;
        self.output.extend_from_slice(&length.to_be_bytes());
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_length(s.len())?;
        self.output.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
