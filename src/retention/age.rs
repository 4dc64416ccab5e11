//! Age arithmetic.
//!
//! An item is "N units old" in a category when its age is at least N and
//! less than N+1 unit lengths. An item exactly one day old is therefore
//! `1` day old, not `0`. Items newer than the reference time have a
//! negative age and a unit age of zero or less.

use crate::models::Category;

/// Age of an item in seconds relative to the reference time.
///
/// Negative when the item lies after the reference time.
#[inline]
#[must_use]
pub fn age_seconds(timestamp: f64, reference_time: f64) -> f64 {
    reference_time - timestamp
}

/// Whole category units contained in `age`.
///
/// Returns `None` for `recent`, which has no unit length. Ages too large
/// for `i64` saturate.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn unit_age(age: f64, category: Category) -> Option<i64> {
    let duration = category.duration_secs()? as f64;
    Some((age / duration).floor() as i64)
}
