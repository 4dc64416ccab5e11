//! Retention rule sets.
//!
//! A rule set maps every [`Category`] to the maximum number of items it may
//! accept. Categories not mentioned claim nothing.
//!
//! # Rule strings
//!
//! ```text
//! hours12,days5,weeks4
//! ```
//!
//! Each comma separated token is a category name immediately followed by a
//! non-negative integer. Empty tokens, unknown names and repeated
//! categories are rejected.

use crate::models::Category;
use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Literal pattern, compilation cannot fail.
#[allow(clippy::expect_used)]
static RULE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)([0-9]+)$").expect("rule token regex"));

/// Validated per-category quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RuleSet {
    counts: [u32; Category::COUNT],
}

impl RuleSet {
    /// Creates a rule set with every quota at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; Category::COUNT],
        }
    }

    /// Builds a rule set from raw `(category name, count)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] when a name is not a known category,
    /// a count is negative or does not fit `u32`, or a category occurs
    /// more than once.
    pub fn validate<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut rules = Self::new();
        let mut seen = [false; Category::COUNT];

        for (name, count) in pairs {
            let name = name.as_ref();
            let category: Category = name.parse()?;
            if count < 0 {
                return Err(Error::InvalidRule(format!(
                    "'{name}' count must be a non-negative integer, got {count}"
                )));
            }
            let count = u32::try_from(count).map_err(|_| {
                Error::InvalidRule(format!("'{name}' count {count} is too large"))
            })?;
            if std::mem::replace(&mut seen[category.rank()], true) {
                return Err(Error::InvalidRule(format!(
                    "category '{name}' given more than once"
                )));
            }
            rules.counts[category.rank()] = count;
        }

        Ok(rules)
    }

    /// Returns the quota for a category.
    #[must_use]
    pub const fn max_count(&self, category: Category) -> u32 {
        self.counts[category.rank()]
    }

    /// Sets the quota for a category.
    #[must_use]
    pub const fn with(mut self, category: Category, count: u32) -> Self {
        self.counts[category.rank()] = count;
        self
    }

    /// Returns `true` if no category may accept anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Upper bound on the number of items a single run can accept.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Iterates `(category, quota)` pairs with a non-zero quota, `recent`
    /// first and then youngest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::all()
            .iter()
            .map(|&c| (c, self.max_count(c)))
            .filter(|&(_, count)| count > 0)
    }
}

impl FromStr for RuleSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut pairs = Vec::new();

        for token in s.split(',') {
            if token.is_empty() {
                return Err(Error::InvalidRule(format!("empty token in '{s}'")));
            }
            let Some(caps) = RULE_TOKEN.captures(token) else {
                return Err(Error::InvalidRule(format!("invalid token '{token}'")));
            };
            let name = caps[1].to_string();
            let count: i64 = caps[2].parse().map_err(|_| {
                Error::InvalidRule(format!("count in '{token}' is too large"))
            })?;
            pairs.push((name, count));
        }

        Self::validate(pairs)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .iter()
            .map(|(category, count)| format!("{category}{count}"))
            .collect();
        f.write_str(&tokens.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_categories_default_to_zero() {
        let rules = RuleSet::validate([("days", 20)]).expect("valid rules");
        assert_eq!(rules.max_count(Category::Days), 20);
        for category in Category::all().iter().filter(|&&c| c != Category::Days) {
            assert_eq!(rules.max_count(*category), 0);
        }
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let err = RuleSet::validate([("days", 1), ("wrong", 1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidRule(_)));
        assert!(err.to_string().contains("wrong"));
    }

    #[test]
    fn test_validate_rejects_negative_count() {
        let err = RuleSet::validate([("days", -1)]).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let err = RuleSet::validate([("days", 1), ("days", 2)]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_accepts_empty_input() {
        let rules = RuleSet::validate(Vec::<(&str, i64)>::new()).expect("valid rules");
        assert!(rules.is_empty());
        assert_eq!(rules.total_capacity(), 0);
    }

    #[test]
    fn test_parse_rule_string() {
        let rules: RuleSet = "hours12,days5,weeks4".parse().expect("valid rules");
        assert_eq!(rules.max_count(Category::Hours), 12);
        assert_eq!(rules.max_count(Category::Days), 5);
        assert_eq!(rules.max_count(Category::Weeks), 4);
        assert_eq!(rules.max_count(Category::Years), 0);
        assert_eq!(rules.total_capacity(), 21);
    }

    #[test]
    fn test_parse_zero_count_is_allowed() {
        let rules: RuleSet = "recent0,days3".parse().expect("valid rules");
        assert_eq!(rules.max_count(Category::Recent), 0);
        assert_eq!(rules.max_count(Category::Days), 3);
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        for bad in [
            "",
            "hours12,",
            ",hours12",
            "hours",
            "12",
            "hours-1",
            "hours 12",
            "Hours12",
            "hours12days3",
            "minutes5",
            "hours1,hours2",
            "hours99999999999",
        ] {
            assert!(bad.parse::<RuleSet>().is_err(), "'{bad}' should be rejected");
        }
    }

    #[test]
    fn test_display_is_canonical() {
        let rules: RuleSet = "weeks4,recent5,hours12,days0".parse().expect("valid rules");
        assert_eq!(rules.to_string(), "recent5,hours12,weeks4");
    }

    #[test]
    fn test_builder() {
        let rules = RuleSet::new()
            .with(Category::Months, 6)
            .with(Category::Years, 2);
        assert_eq!(rules.max_count(Category::Months), 6);
        assert_eq!(rules.to_string(), "months6,years2");
        assert!(!rules.is_empty());
    }
}
