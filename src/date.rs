//! LLSD date values.
//!
//! A [`Date`] is stored exactly as the binary wire format carries it: a double-precision
//! count of seconds since 1970-01-01T00:00:00Z. Keeping the raw seconds means a date read
//! from binary input is written back bit-for-bit, sub-second precision included.
//!
//! The textual form used by the JSON bridge is the second-resolution UTC string
//! `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ```rust
//! use serde_llsd::Date;
//!
//! let date: Date = "2025-11-15T12:30:00Z".parse().unwrap();
//! assert_eq!(date.epoch_seconds(), 1_763_209_800.0);
//! assert_eq!(date.to_string(), "2025-11-15T12:30:00Z");
//! ```

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// Well past chrono's +/-262143 year range, small enough to convert to i64 exactly.
const MAX_ABS_SECONDS: f64 = 1.0e15;

/// A point in time, held as seconds since the Unix epoch.
///
/// Always finite and within the range [`chrono::DateTime<Utc>`] can represent, so the
/// canonical string form is always available.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Date(f64);

impl Date {
    /// The Unix epoch, 1970-01-01T00:00:00Z.
    #[must_use]
    pub const fn epoch() -> Self {
        Date(0.0)
    }

    /// Creates a date from fractional seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] for NaN, infinities, and instants outside the
    /// calendar range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_llsd::Date;
    ///
    /// assert!(Date::from_epoch_seconds(1.5).is_ok());
    /// assert!(Date::from_epoch_seconds(f64::NAN).is_err());
    /// ```
    pub fn from_epoch_seconds(seconds: f64) -> Result<Self> {
        if to_datetime(seconds).is_none() {
            return Err(Error::invalid_date(format!(
                "{} seconds is not a representable instant",
                seconds
            )));
        }
        Ok(Date(seconds))
    }

    /// Creates a date from whole seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] for instants outside the calendar range.
    pub fn from_timestamp(seconds: i64) -> Result<Self> {
        Self::from_epoch_seconds(seconds as f64)
    }

    /// Creates a date from a chrono UTC datetime, keeping sub-second precision as far as
    /// an `f64` can hold it.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let seconds =
            datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
        Date(seconds)
    }

    /// Parses the canonical `YYYY-MM-DDTHH:MM:SSZ` form.
    ///
    /// Offsets other than `Z`, fractional seconds and lower-case separators are rejected.
    /// Fields past their calendar range carry into the next larger field, so
    /// `2025-02-30T00:00:00Z` is 2025-03-02 and a leap second `23:59:60` is midnight of the
    /// following day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if the text is not in canonical form.
    ///
    /// ```rust
    /// use serde_llsd::Date;
    ///
    /// let date = Date::parse("2025-02-30T00:00:00Z").unwrap();
    /// assert_eq!(date.to_string(), "2025-03-02T00:00:00Z");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        if !is_canonical_shape(text) {
            return Err(Error::invalid_date(format!(
                "{:?} is not in YYYY-MM-DDTHH:MM:SSZ form",
                text
            )));
        }
        let bytes = text.as_bytes();
        let field = |start: usize, end: usize| {
            bytes[start..end]
                .iter()
                .fold(0_i64, |acc, &b| acc * 10 + i64::from(b - b'0'))
        };

        // Month 00 is December of the previous year, month 13 January of the next.
        let months = field(0, 4) * 12 + field(5, 7) - 1;
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) + 1;
        let first_of_month = i32::try_from(year)
            .ok()
            .zip(u32::try_from(month).ok())
            .and_then(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| Error::invalid_date(format!("{:?} is out of range", text)))?;

        let seconds = Utc.from_utc_datetime(&first_of_month).timestamp()
            + (field(8, 10) - 1) * 86_400
            + field(11, 13) * 3_600
            + field(14, 16) * 60
            + field(17, 19);
        Self::from_timestamp(seconds)
    }

    /// Seconds since the Unix epoch, exactly as carried on the wire.
    #[inline]
    #[must_use]
    pub const fn epoch_seconds(&self) -> f64 {
        self.0
    }

    /// Converts to a chrono UTC datetime.
    #[must_use]
    pub fn to_datetime(&self) -> DateTime<Utc> {
        to_datetime(self.0).unwrap_or_default()
    }
}

fn to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds.abs() > MAX_ABS_SECONDS {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Returns `true` if `text` has exactly the `YYYY-MM-DDTHH:MM:SSZ` shape.
///
/// Only the character classes are checked here; out-of-range fields are normalized by
/// [`Date::parse`].
pub(crate) fn is_canonical_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 20 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b'T',
        13 | 16 => b == b':',
        19 => b == b'Z',
        _ => b.is_ascii_digit(),
    })
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_datetime().format(CANONICAL_FORMAT))
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse(s)
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(datetime: DateTime<Utc>) -> Self {
        Date::from_datetime(datetime)
    }
}

impl From<Date> for DateTime<Utc> {
    fn from(date: Date) -> Self {
        date.to_datetime()
    }
}
