//! Time categories.
//!
//! Five linear categories, each a fixed number of seconds, plus the special
//! `recent` category covering everything younger than one hour.
//!
//! | Category | Unit length | Seconds |
//! |----------|-------------|---------|
//! | `hours`  | 60 minutes  | 3600 |
//! | `days`   | 24 hours    | 86400 |
//! | `weeks`  | 7 days      | 604800 |
//! | `months` | 30 days     | 2592000 |
//! | `years`  | 365 days    | 31536000 |

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Items younger than this many seconds are `recent`.
pub const RECENT_WINDOW_SECS: f64 = 3600.0;

/// A named time granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Everything younger than one hour, not sub-divided.
    Recent,
    /// One-hour units.
    Hours,
    /// One-day units.
    Days,
    /// Seven-day units.
    Weeks,
    /// Thirty-day units.
    Months,
    /// 365-day units.
    Years,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 6;

    /// Linear categories in processing order, youngest first.
    ///
    /// Position in this array is the priority: earlier categories claim
    /// items before later ones.
    pub const LINEAR: [Self; 5] = [Self::Hours, Self::Days, Self::Weeks, Self::Months, Self::Years];

    /// Returns all categories, `recent` first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Recent,
            Self::Hours,
            Self::Days,
            Self::Weeks,
            Self::Months,
            Self::Years,
        ]
    }

    /// Returns the category name as used in rule strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }

    /// Returns the unit length in seconds, `None` for `recent`.
    #[must_use]
    pub const fn duration_secs(&self) -> Option<u64> {
        match self {
            Self::Recent => None,
            Self::Hours => Some(3_600),
            Self::Days => Some(86_400),
            Self::Weeks => Some(604_800),
            Self::Months => Some(2_592_000),
            Self::Years => Some(31_536_000),
        }
    }

    /// Processing rank: 0 for `recent`, then 1 (hours) through 5 (years).
    ///
    /// Lower ranks are processed first and win overlaps.
    #[must_use]
    pub const fn rank(&self) -> usize {
        match self {
            Self::Recent => 0,
            Self::Hours => 1,
            Self::Days => 2,
            Self::Weeks => 3,
            Self::Months => 4,
            Self::Years => 5,
        }
    }

    /// Returns `true` for every category except `recent`.
    #[must_use]
    pub const fn is_linear(&self) -> bool {
        !matches!(self, Self::Recent)
    }

    /// Parses a category name. Matching is exact (lowercase).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == s)
    }

    /// Comma separated list of valid names, for error messages and help text.
    #[must_use]
    pub fn valid_names() -> String {
        Self::all()
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            Error::InvalidRule(format!(
                "unknown category '{s}' (valid: {})",
                Self::valid_names()
            ))
        })
    }
}
