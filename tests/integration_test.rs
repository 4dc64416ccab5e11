//! Integration tests for timegaps.
#![allow(
    clippy::panic,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_precision_loss,
    clippy::doc_markdown
)]

use test_case::test_case;
use timegaps::models::{Category, Item};
use timegaps::retention::{Bucket, Classification, RuleSet, Verdict, classify, filter};
use timegaps::Error;

const REF: f64 = 1_700_000_000.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Builds items named after their index, aged `ages` seconds.
fn items_aged(ages: &[f64]) -> Vec<Item> {
    ages.iter()
        .enumerate()
        .map(|(i, age)| Item::new(i.to_string(), REF - age))
        .collect()
}

fn accepted_ids(rules: &str, ages: &[f64]) -> Vec<String> {
    let rules: RuleSet = rules.parse().expect("valid rules");
    filter(items_aged(ages), &rules, REF)
        .expect("classify")
        .accepted
        .into_iter()
        .map(|item| item.id)
        .collect()
}

#[test_case("hours12", &[500.0, 4_000.0, 7_300.0], &["1", "2"] ; "hours without recent quota")]
#[test_case("recent1,hours12", &[500.0, 4_000.0, 7_300.0], &["0", "1", "2"] ; "hours with recent quota")]
#[test_case("days10,weeks1", &[11.0 * DAY, 9.0 * DAY], &["0", "1"] ; "days overflow into weeks")]
#[test_case("hours2", &[3_700.0, 3_650.0, 3_800.0], &["1"] ; "one winner per bucket")]
#[test_case("years1", &[5.0 * YEAR], &[] ; "too old for years quota")]
#[test_case("recent0", &[1.0, 2.0 * DAY], &[] ; "empty rule set")]
#[test_case("days1", &[DAY], &["0"] ; "exact unit boundary")]
#[test_case("days1", &[DAY - 1.0], &[] ; "just below unit boundary")]
#[test_case("recent2", &[300.0, 100.0, 200.0, HOUR], &["1", "2"] ; "recent keeps newest")]
fn test_retention_scenarios(rules: &str, ages: &[f64], expected: &[&str]) {
    assert_eq!(accepted_ids(rules, ages), expected);
}

#[test]
fn test_consumed_loser_is_not_offered_to_older_category() {
    // Both items are 8 days old; the loser of days/8 must not win weeks/1.
    let rules: RuleSet = "days10,weeks1".parse().expect("valid rules");
    let items = items_aged(&[8.0 * DAY, 8.0 * DAY + HOUR]);
    let classifications = classify(&items, &rules, REF).expect("classify");
    assert_eq!(
        classifications,
        [
            Classification {
                verdict: Verdict::Accepted,
                bucket: Some(Bucket::linear(Category::Days, 8)),
            },
            Classification {
                verdict: Verdict::Rejected,
                bucket: Some(Bucket::linear(Category::Days, 8)),
            },
        ]
    );
}

#[test]
fn test_identical_timestamps_prefer_input_order() {
    let rules: RuleSet = "hours1".parse().expect("valid rules");
    let ids: Vec<String> = ["first", "second", "third"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let items: Vec<Item> = ids
        .iter()
        .map(|id| Item::new(id.clone(), REF - 1.5 * HOUR))
        .collect();
    let partition = filter(items, &rules, REF).expect("classify");
    assert_eq!(partition.accepted[0].id, "first");
    assert_eq!(partition.rejected.len(), 2);
}

#[test]
fn test_future_items_are_only_recent() {
    let items = items_aged(&[-DAY]);
    assert!(accepted_ids("hours24,days7", &[-DAY]).is_empty());
    assert_eq!(accepted_ids("recent1", &[-DAY]), ["0"]);
    let rules: RuleSet = "days1".parse().expect("valid rules");
    let classifications = classify(&items, &rules, REF).expect("classify");
    assert_eq!(classifications[0].bucket, None);
}

#[test]
fn test_partition_keeps_input_order() {
    let rules: RuleSet = "days5".parse().expect("valid rules");
    let partition = filter(
        items_aged(&[4.5 * DAY, 1.5 * DAY, 30.0 * DAY, 3.2 * DAY, 1.2 * DAY]),
        &rules,
        REF,
    )
    .expect("classify");
    let ids = |items: &[Item]| items.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&partition.accepted), ["0", "3", "4"]);
    assert_eq!(ids(&partition.rejected), ["1", "2"]);
}

#[test]
fn test_error_types() {
    let err = "days5,days6".parse::<RuleSet>().unwrap_err();
    assert!(matches!(err, Error::InvalidRule(_)));
    assert!(err.to_string().contains("days"));

    let err = classify(&[Item::new("nan", f64::NAN)], &RuleSet::new(), REF).unwrap_err();
    assert!(matches!(err, Error::InvalidItem { index: 0, .. }));

    let err = classify::<Item>(&[], &RuleSet::new(), f64::INFINITY).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = Error::OperationFailed {
        operation: "delete".to_string(),
        cause: "permission denied".to_string(),
    };
    let display = err.to_string();
    assert!(display.contains("delete"));
    assert!(display.contains("permission denied"));
}

#[test]
fn test_rules_validate_from_pairs() {
    let rules = RuleSet::validate([("days", 3), ("recent", 1)]).expect("valid");
    assert_eq!(rules.max_count(Category::Days), 3);
    assert_eq!(rules.max_count(Category::Recent), 1);
    assert!(RuleSet::validate([("days", -1)]).is_err());
    assert!(RuleSet::validate([("fortnights", 1)]).is_err());
}
