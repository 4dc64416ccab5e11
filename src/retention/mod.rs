//! Age-bucketed retention.
//!
//! Given items, a [`RuleSet`] and a reference time, decide which items to
//! keep. This module performs no I/O: it sees timestamps only.
//!
//! # Example
//!
//! ```rust
//! use timegaps::models::Item;
//! use timegaps::retention::{RuleSet, filter};
//!
//! const DAY: f64 = 86_400.0;
//! let now = 1_700_000_000.0;
//!
//! // One item for each of the last 10 days, one for the first week.
//! let rules: RuleSet = "days10,weeks1".parse()?;
//! let items = vec![
//!     Item::new("nine-days", now - 9.0 * DAY),
//!     Item::new("eleven-days", now - 11.0 * DAY),
//! ];
//!
//! let partition = filter(items, &rules, now)?;
//! assert_eq!(partition.accepted.len(), 2);
//! # Ok::<(), timegaps::Error>(())
//! ```

mod age;
mod classifier;
mod partition;
mod rules;

pub use age::{age_seconds, unit_age};
pub use classifier::{Bucket, Classification, Verdict, classify, filter};
pub use partition::Partition;
pub use rules::RuleSet;
