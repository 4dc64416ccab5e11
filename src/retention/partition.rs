//! Accepted/rejected split of a classified batch.

use super::classifier::Verdict;

/// The two disjoint halves of a classified batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Items that won a bucket.
    pub accepted: Vec<T>,
    /// Everything else.
    pub rejected: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> Partition<T> {
    /// Builds a partition from `(item, verdict)` pairs, keeping their order
    /// within each half.
    pub fn from_verdicts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, Verdict)>,
    {
        let mut partition = Self::default();
        for (item, verdict) in pairs {
            match verdict {
                Verdict::Accepted => partition.accepted.push(item),
                Verdict::Rejected => partition.rejected.push(item),
            }
        }
        partition
    }

    /// Total number of items in both halves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    /// Returns `true` if the partition holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }

    /// Returns the accepted half if `accepted`, otherwise the rejected half.
    #[must_use]
    pub fn select(&self, accepted: bool) -> &[T] {
        if accepted {
            &self.accepted
        } else {
            &self.rejected
        }
    }
}
