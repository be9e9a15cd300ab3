//! Benchmarks for the deadline calculators.
//!
//! Run with: cargo bench -p plazo-core

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plazo_core::calendars::{Calendar, ColombiaCalendar};
use plazo_core::strategies::{DeadlineCalculator, Strategy};
use plazo_core::suspensions::{normalize, OverlapPolicy};
use plazo_core::types::{CalculationParams, Suspension, TermUnit, Timestamp};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn created_at() -> Timestamp {
    Timestamp::from_ymd_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

/// Overlapping suspensions spread across the first months of 2024.
fn create_suspensions(count: usize) -> Vec<Suspension> {
    let base = created_at();
    (0..count)
        .map(|i| {
            let offset = i64::try_from(i).unwrap();
            let start = base.add_hours(offset * 20 + 1).unwrap();
            let end = start.add_hours(26).unwrap();
            Suspension::new(start, end).with_id(format!("S{i:04}"))
        })
        .collect()
}

// =============================================================================
// CALENDAR BENCHMARKS
// =============================================================================

fn bench_calendar_construction(c: &mut Criterion) {
    c.bench_function("colombia_calendar_new", |b| b.iter(ColombiaCalendar::new));
}

fn bench_add_business_days(c: &mut Criterion) {
    let cal = ColombiaCalendar::new();
    let start = created_at().date();

    let mut group = c.benchmark_group("add_business_days");
    for days in [5u32, 15, 30, 250] {
        group.bench_with_input(BenchmarkId::from_parameter(days), &days, |b, &days| {
            b.iter(|| cal.add_business_days(black_box(start), black_box(days)));
        });
    }
    group.finish();
}

// =============================================================================
// DEADLINE BENCHMARKS
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for count in [10usize, 100, 1000] {
        let raw = create_suspensions(count);
        for policy in [OverlapPolicy::ShiftStart, OverlapPolicy::ExtendPrevious] {
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), count),
                &raw,
                |b, raw| b.iter(|| normalize(black_box(raw), created_at(), policy)),
            );
        }
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let calendar: Arc<dyn Calendar> = Arc::new(ColombiaCalendar::new());
    let suspensions = create_suspensions(20);

    let mut group = c.benchmark_group("calculate");
    for unit in [TermUnit::Hours, TermUnit::CalendarDays, TermUnit::BusinessDays] {
        let strategy = Strategy::for_unit(unit, calendar.clone());
        let params =
            CalculationParams::new(created_at(), 15, unit).with_suspensions(suspensions.clone());
        group.bench_function(unit.as_str(), |b| {
            b.iter(|| strategy.calculate(black_box(&params)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_calendar_construction,
    bench_add_business_days,
    bench_normalize,
    bench_strategies
);
criterion_main!(benches);
