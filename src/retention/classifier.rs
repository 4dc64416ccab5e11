//! The retention classifier.
//!
//! Every item is claimed by at most one bucket. `recent` goes first, then
//! the linear categories from youngest to oldest. A linear category claims
//! every still unclaimed item whose unit age lies in `[1, quota]`, whether
//! or not the item ends up winning its bucket; older categories never see
//! it again. Inside a bucket the youngest item wins. Equal ages are
//! resolved by input position, the earlier item wins.

use super::age::{age_seconds, unit_age};
use super::partition::Partition;
use super::rules::RuleSet;
use crate::models::{Category, RECENT_WINDOW_SECS, Timestamped};
use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument};

/// A slot that admits at most one accepted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket {
    /// The category owning the slot.
    pub category: Category,
    /// Unit age within the category, `None` for `recent`.
    pub unit: Option<u32>,
}

impl Bucket {
    /// The single `recent` bucket.
    #[must_use]
    pub const fn recent() -> Self {
        Self {
            category: Category::Recent,
            unit: None,
        }
    }

    /// The bucket of items `unit` units old in `category`.
    #[must_use]
    pub const fn linear(category: Category, unit: u32) -> Self {
        Self {
            category,
            unit: Some(unit),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}/{unit}", self.category),
            None => write!(f, "{}", self.category),
        }
    }
}

/// Final decision for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The item is kept.
    Accepted,
    /// The item is discarded.
    Rejected,
}

/// Verdict plus the bucket that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Accepted or rejected.
    pub verdict: Verdict,
    /// Bucket that claimed the item; `None` if no category did.
    pub bucket: Option<Bucket>,
}

impl Classification {
    /// Returns `true` if the item is kept.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Per-item progress through the category passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    Unclaimed,
    Accepted(Bucket),
    Rejected(Bucket),
}

impl ItemState {
    const fn is_unclaimed(self) -> bool {
        matches!(self, Self::Unclaimed)
    }

    const fn into_classification(self) -> Classification {
        match self {
            Self::Unclaimed => Classification {
                verdict: Verdict::Rejected,
                bucket: None,
            },
            Self::Accepted(bucket) => Classification {
                verdict: Verdict::Accepted,
                bucket: Some(bucket),
            },
            Self::Rejected(bucket) => Classification {
                verdict: Verdict::Rejected,
                bucket: Some(bucket),
            },
        }
    }
}

/// Classifies `items` and splits them into accepted and rejected.
///
/// Both collections keep input order.
///
/// # Errors
///
/// Returns [`Error::InvalidItem`] if an item's timestamp is not finite and
/// [`Error::InvalidInput`] if the reference time is not finite.
pub fn filter<T: Timestamped>(
    items: Vec<T>,
    rules: &RuleSet,
    reference_time: f64,
) -> Result<Partition<T>> {
    let classifications = classify(&items, rules, reference_time)?;
    Ok(Partition::from_verdicts(
        items
            .into_iter()
            .zip(classifications.into_iter().map(|c| c.verdict)),
    ))
}

/// Classifies every item, returning one [`Classification`] per input item
/// in input order.
///
/// # Errors
///
/// Returns [`Error::InvalidItem`] if an item's timestamp is not finite and
/// [`Error::InvalidInput`] if the reference time is not finite.
#[instrument(
    name = "timegaps.retention.classify",
    skip(items, rules),
    fields(items = items.len(), rules = %rules)
)]
pub fn classify<T: Timestamped>(
    items: &[T],
    rules: &RuleSet,
    reference_time: f64,
) -> Result<Vec<Classification>> {
    if !reference_time.is_finite() {
        return Err(Error::InvalidInput(format!(
            "reference time {reference_time} is not a finite number"
        )));
    }

    let ages = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let timestamp = item.timestamp();
            if timestamp.is_finite() {
                Ok(age_seconds(timestamp, reference_time))
            } else {
                Err(Error::InvalidItem {
                    index,
                    reason: format!("timestamp {timestamp} is not a finite number"),
                })
            }
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut states = vec![ItemState::Unclaimed; ages.len()];
    claim_recent(&ages, rules.max_count(Category::Recent), &mut states);
    for category in Category::LINEAR {
        claim_linear(&ages, category, rules.max_count(category), &mut states);
    }

    let classifications: Vec<Classification> = states
        .into_iter()
        .map(ItemState::into_classification)
        .collect();

    let accepted = classifications.iter().filter(|c| c.is_accepted()).count();
    let rejected = classifications.len() - accepted;
    metrics::counter!("timegaps_classifications_total").increment(1);
    metrics::counter!("timegaps_items_accepted_total").increment(accepted as u64);
    metrics::counter!("timegaps_items_rejected_total").increment(rejected as u64);
    debug!(accepted, rejected, "Classification completed");

    Ok(classifications)
}

/// Orders item indices by age, youngest first, then by input position.
fn by_age(ages: &[f64]) -> impl Fn(&usize, &usize) -> Ordering + '_ {
    move |&a, &b| ages[a].total_cmp(&ages[b]).then(a.cmp(&b))
}

fn claim_recent(ages: &[f64], quota: u32, states: &mut [ItemState]) {
    if quota == 0 {
        return;
    }

    let mut recent: Vec<usize> = (0..ages.len())
        .filter(|&i| states[i].is_unclaimed() && ages[i] < RECENT_WINDOW_SECS)
        .collect();
    recent.sort_by(by_age(ages));

    let quota = usize::try_from(quota).unwrap_or(usize::MAX);
    let bucket = Bucket::recent();
    for (position, &index) in recent.iter().enumerate() {
        states[index] = if position < quota {
            ItemState::Accepted(bucket)
        } else {
            ItemState::Rejected(bucket)
        };
    }

    debug!(
        category = %Category::Recent,
        claimed = recent.len(),
        accepted = recent.len().min(quota),
        "Category processed"
    );
}

fn claim_linear(ages: &[f64], category: Category, quota: u32, states: &mut [ItemState]) {
    if quota == 0 {
        return;
    }

    let mut buckets: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, state) in states.iter().enumerate() {
        if !state.is_unclaimed() {
            continue;
        }
        let Some(Ok(unit)) = unit_age(ages[index], category).map(u32::try_from) else {
            continue;
        };
        if (1..=quota).contains(&unit) {
            buckets.entry(unit).or_default().push(index);
        }
    }

    let mut claimed = 0;
    for (&unit, members) in &buckets {
        let bucket = Bucket::linear(category, unit);
        let winner = members.iter().copied().min_by(by_age(ages));
        for &index in members {
            states[index] = if Some(index) == winner {
                ItemState::Accepted(bucket)
            } else {
                ItemState::Rejected(bucket)
            };
        }
        claimed += members.len();
    }

    debug!(
        category = %category,
        claimed,
        accepted = buckets.len(),
        "Category processed"
    );
}
