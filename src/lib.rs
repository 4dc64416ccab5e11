//! # Timegaps
//!
//! Accept or reject time-stamped items according to age-bucketed retention
//! rules.
//!
//! A rule such as `hours12,days5,weeks4` asks for the newest item in each of
//! the last 12 hours, the last 5 days and the last 4 weeks. Everything that
//! does not win one of those slots is rejected. The typical use is pruning
//! backup directories or rotated log files.
//!
//! ## Layout
//!
//! - [`models`]: categories and the item abstraction
//! - [`retention`]: rule sets, age arithmetic, the classifier and partitioner
//! - [`input`]: turning paths and strings into classifiable items
//! - [`actions`]: deleting or moving classified file system entries
//! - [`config`], [`observability`], [`cli`]: the command line tool
//!
//! ## Example
//!
//! ```rust
//! use timegaps::models::Item;
//! use timegaps::retention::{RuleSet, filter};
//!
//! let reference = 1_700_000_000.0;
//! let rules: RuleSet = "hours12".parse()?;
//! let items = vec![
//!     Item::new("a", reference - 500.0),
//!     Item::new("b", reference - 4_000.0),
//!     Item::new("c", reference - 7_300.0),
//! ];
//!
//! let partition = filter(items, &rules, reference)?;
//! assert_eq!(partition.accepted.len(), 2);
//! assert_eq!(partition.rejected.len(), 1);
//! # Ok::<(), timegaps::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod actions;
pub mod cli;
pub mod config;
pub mod input;
pub mod models;
pub mod observability;
pub mod retention;

pub use config::TimegapsConfig;
pub use models::{Category, Item, Timestamped};
pub use retention::{Bucket, Classification, Partition, RuleSet, Verdict, classify, filter};

/// Error type for timegaps operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidRule` | Unknown category, malformed token, negative or duplicated count |
/// | `InvalidItem` | An item handed to the classifier has no usable timestamp |
/// | `InvalidInput` | Bad command line usage, unparsable item or reference time |
/// | `OperationFailed` | File system access, config file, logging setup, actions |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A retention rule could not be validated.
    ///
    /// No partial rule set is ever produced.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// An item cannot be classified.
    #[error("invalid item at position {index}: {reason}")]
    InvalidItem {
        /// Position of the item in the input batch.
        index: usize,
        /// Why the item was refused.
        reason: String,
    },

    /// Invalid input was provided outside the classifier.
    ///
    /// Raised when:
    /// - Command line arguments contradict each other
    /// - An item or reference time cannot be parsed with the given format
    /// - An item read from stdin is empty
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - A path cannot be inspected, deleted or moved
    /// - The configuration file cannot be read or parsed
    /// - Logging is initialized twice
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for timegaps operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix time in seconds, with sub-second precision.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
