//! Benchmarks for the retention classifier.
//!
//! Measures classification of synthetic backup histories: one item every
//! few minutes going back several years, filtered with a typical rotation
//! scheme.

// Criterion macros generate items without docs - this is expected for benchmarks
// Benchmarks use expect/unwrap for simplicity - panics are acceptable in benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use timegaps::models::Item;
use timegaps::retention::{RuleSet, classify, filter};

const REF: f64 = 1_700_000_000.0;

/// Creates `count` items spread evenly over the last three years.
fn history(count: usize) -> Vec<Item> {
    let span = 3.0 * 31_536_000.0;
    let step = span / count as f64;
    (0..count)
        .map(|i| Item::new(format!("backup-{i}"), REF - i as f64 * step))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let rules: RuleSet = "recent6,hours24,days14,weeks8,months12,years3"
        .parse()
        .expect("valid rules");
    let mut group = c.benchmark_group("classify");

    for count in [100, 1_000, 10_000, 100_000] {
        let items = history(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| classify(black_box(items), &rules, REF).expect("classify"));
        });
    }

    group.finish();
}

fn bench_filter_dense_bucket(c: &mut Criterion) {
    // Every item falls into hours/1, so the winner search dominates.
    let rules: RuleSet = "hours1".parse().expect("valid rules");
    let items: Vec<Item> = (0..10_000)
        .map(|i| Item::new(i.to_string(), REF - 3_600.0 - f64::from(i % 3_600)))
        .collect();

    c.bench_function("filter_dense_bucket", |b| {
        b.iter(|| filter(black_box(items.clone()), &rules, REF).expect("filter"));
    });
}

criterion_group!(benches, bench_classify, bench_filter_dense_bucket);
criterion_main!(benches);
