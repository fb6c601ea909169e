use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::*;

use crate::error::{GeometryError, GeometryResult};

/// Modified Julian Date representation.
/// MJD 0 = 1858-11-17 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(qtty::Days);

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new<V: Into<qtty::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(qtty::Days::new(timestamp / 86400.0 + 40587.0))
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(qtty::Days::new(v))
    }
}

/// Naive layouts accepted in addition to RFC 3339. They are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an observation timestamp into a UTC instant.
///
/// RFC 3339 strings carrying an offset are converted to UTC. Strings without an
/// offset (`2025-06-18 14:00`) are taken to already be UTC; converting from
/// local civil time is the caller's job.
///
/// # Errors
/// Returns `GeometryError::InvalidInput` with the parser error as source.
pub fn parse_utc_timestamp(input: &str) -> GeometryResult<DateTime<Utc>> {
    let trimmed = input.trim();
    let rfc_err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(GeometryError::invalid_input_with_source(
        format!("Unrecognised timestamp '{}'", trimmed),
        rfc_err,
    ))
}

/// Combine a separate date (`YYYY-MM-DD`) and time (`HH:MM` or `HH:MM:SS`) into a UTC instant.
pub fn combine_utc_date_time(date: &str, time: &str) -> GeometryResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        GeometryError::invalid_input_with_source(format!("Unrecognised date '{}'", date), e)
    })?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .map_err(|e| {
            GeometryError::invalid_input_with_source(format!("Unrecognised time '{}'", time), e)
        })?;
    Ok(date.and_time(time).and_utc())
}
