//! Time parsing helpers.

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

/// Converts a [`SystemTime`] to fractional seconds since the Unix epoch.
///
/// Times before the epoch come out negative.
#[must_use]
pub fn system_time_to_timestamp(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

/// Parses `text` with a strftime-style `format`.
///
/// When the format carries a UTC offset (`%z`, `%:z`) the offset is
/// honored; otherwise the result is interpreted as local time. Formats
/// without a time of day (for example `%Y-%m-%d`) mean midnight. During a
/// DST fold the earlier instant is used.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `text` does not match `format` or the
/// local time does not exist.
pub fn parse_local_time(text: &str, format: &str) -> Result<f64> {
    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        return Ok(datetime_to_timestamp(&dt));
    }

    let naive = NaiveDateTime::parse_from_str(text, format)
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(text, format)
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| {
            Error::InvalidInput(format!(
                "cannot parse time from '{text}' with format '{format}': {e}"
            ))
        })?;

    let local = Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
        Error::InvalidInput(format!("'{text}' does not exist in the local time zone"))
    })?;

    Ok(datetime_to_timestamp(&local))
}

/// Parses a reference time given on the command line.
///
/// Accepts a Unix timestamp (`1700000000`, `1700000000.25`) or an RFC 3339
/// date-time (`2024-01-15T10:00:00Z`).
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if neither form matches.
pub fn parse_reference_time(text: &str) -> Result<f64> {
    let text = text.trim();
    if let Ok(seconds) = text.parse::<f64>() {
        if seconds.is_finite() {
            return Ok(seconds);
        }
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| datetime_to_timestamp(&dt))
        .map_err(|e| {
            Error::InvalidInput(format!(
                "reference time '{text}' is neither a Unix timestamp nor RFC 3339: {e}"
            ))
        })
}

#[allow(clippy::cast_precision_loss)]
fn datetime_to_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}
