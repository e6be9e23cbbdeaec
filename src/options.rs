//! Configuration options for LLSD encoding and decoding.
//!
//! [`LlsdOptions`] is passed to the `*_with_options` entry points. The defaults match
//! what other LLSD implementations produce and accept, so most callers never need it.
//!
//! ## Examples
//!
//! ```rust
//! use serde_llsd::{llsd, to_vec_with_options, LlsdOptions};
//!
//! let value = llsd!([1, 2]);
//!
//! // Prefix binary output with the `<?llsd/binary?>` header line
//! let options = LlsdOptions::new().with_header(true);
//! let bytes = to_vec_with_options(&value, &options).unwrap();
//! assert!(bytes.starts_with(b"<?llsd/binary?>\n"));
//!
//! // Refuse anything nested deeper than 8 containers
//! let options = LlsdOptions::new().with_max_depth(8);
//! ```

/// Nesting limit applied by the binary decoder unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for LLSD encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use serde_llsd::LlsdOptions;
///
/// // Default compact options
/// let options = LlsdOptions::new();
/// assert!(!options.header);
/// assert_eq!(options.max_depth, 128);
///
/// // Pretty-printed JSON
/// let options = LlsdOptions::pretty();
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LlsdOptions {
    /// Write the `<?llsd/binary?>\n` header before binary output.
    pub header: bool,
    /// Deepest container nesting the binary decoder accepts.
    pub max_depth: usize,
    /// Pretty-print JSON text output.
    pub pretty: bool,
}

impl Default for LlsdOptions {
    fn default() -> Self {
        LlsdOptions {
            header: false,
            max_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl LlsdOptions {
    /// Creates default options (no binary header, depth limit 128, compact JSON).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed JSON output.
    #[must_use]
    pub fn pretty() -> Self {
        LlsdOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets whether binary output starts with the `<?llsd/binary?>` header line.
    ///
    /// Decoding accepts input with or without the header regardless of this setting.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Sets the deepest container nesting the binary decoder accepts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::{from_slice_with_options, Error, LlsdOptions};
    ///
    /// let nested = b"[\x00\x00\x00\x01[\x00\x00\x00\x00]]";
    /// let options = LlsdOptions::new().with_max_depth(1);
    /// let result = from_slice_with_options(nested, &options);
    /// assert!(matches!(result, Err(Error::DepthLimitExceeded { limit: 1, .. })));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether JSON text output is pretty-printed.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
