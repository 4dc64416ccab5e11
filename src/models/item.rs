//! The item abstraction consumed by the classifier.

use std::fmt;

/// Anything that carries a point in time.
///
/// The classifier only ever asks an item for its timestamp: seconds since
/// the Unix epoch, fractional seconds allowed. Reporting uses whatever
/// identity the implementing type carries.
pub trait Timestamped {
    /// Seconds since the Unix epoch.
    fn timestamp(&self) -> f64;
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn timestamp(&self) -> f64 {
        (**self).timestamp()
    }
}

/// A plain (identifier, timestamp) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Identifier used when reporting the item.
    pub id: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl Item {
    /// Creates a new item.
    #[must_use]
    pub fn new(id: impl Into<String>, timestamp: f64) -> Self {
        Self {
            id: id.into(),
            timestamp,
        }
    }
}

impl Timestamped for Item {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
