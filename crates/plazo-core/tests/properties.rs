//! Property tests for suspension normalization and the calculators.

use std::sync::Arc;

use plazo_core::calendars::{Calendar, ColombiaCalendar};
use plazo_core::strategies::{DeadlineCalculator, Strategy as DeadlineStrategy};
use plazo_core::suspensions::{normalize, OverlapPolicy};
use plazo_core::types::{CalculationParams, Suspension, TermUnit, Timestamp};
use proptest::prelude::*;

fn base() -> Timestamp {
    Timestamp::parse("2024-01-15 10:00:00").unwrap()
}

/// Suspensions within roughly two months of the base instant, some starting
/// before it and some with non-positive durations.
fn arb_suspensions() -> impl Strategy<Value = Vec<Suspension>> {
    prop::collection::vec((-48i64..1500, -5i64..120), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(offset, length)| {
                let start = base().add_hours(offset).unwrap();
                let end = start.add_hours(length).unwrap();
                Suspension::new(start, end)
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = OverlapPolicy> {
    prop_oneof![Just(OverlapPolicy::ShiftStart), Just(OverlapPolicy::ExtendPrevious)]
}

fn arb_unit() -> impl Strategy<Value = TermUnit> {
    prop_oneof![
        Just(TermUnit::Hours),
        Just(TermUnit::CalendarDays),
        Just(TermUnit::BusinessDays)
    ]
}

fn colombia() -> Arc<dyn Calendar> {
    Arc::new(ColombiaCalendar::new())
}

proptest! {
    /// Normalized intervals are positive, ordered, disjoint and never start
    /// before the lower bound.
    #[test]
    fn normalized_intervals_are_disjoint(raw in arb_suspensions(), policy in arb_policy()) {
        let normalized = normalize(&raw, base(), policy);

        for interval in normalized.iter() {
            prop_assert!(interval.end > interval.start);
            prop_assert!(interval.start >= base());
        }
        for pair in normalized.intervals().windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        prop_assert_eq!(normalized.len() + normalized.discarded().len(), raw.len());
    }

    /// Both policies cover exactly the same total time.
    #[test]
    fn policies_cover_the_same_time(raw in arb_suspensions()) {
        let shifted = normalize(&raw, base(), OverlapPolicy::ShiftStart);
        let merged = normalize(&raw, base(), OverlapPolicy::ExtendPrevious);
        prop_assert_eq!(shifted.total_duration_seconds(), merged.total_duration_seconds());
    }

    /// Suspensions never bring a deadline earlier.
    #[test]
    fn suspensions_never_shorten_deadline(
        raw in arb_suspensions(),
        unit in arb_unit(),
        amount in 1u32..40,
    ) {
        let strategy = DeadlineStrategy::for_unit(unit, colombia());
        let plain = CalculationParams::new(base(), amount, unit);
        let suspended = plain.clone().with_suspensions(raw);

        let without = strategy.calculate(&plain).unwrap();
        let with = strategy.calculate(&suspended).unwrap();
        prop_assert!(with >= without);
    }

    /// A longer term never yields an earlier deadline.
    #[test]
    fn deadline_is_monotonic_in_amount(unit in arb_unit(), amount in 1u32..60) {
        let strategy = DeadlineStrategy::for_unit(unit, colombia());
        let shorter = strategy.calculate(&CalculationParams::new(base(), amount, unit)).unwrap();
        let longer = strategy.calculate(&CalculationParams::new(base(), amount + 1, unit)).unwrap();
        prop_assert!(longer > shorter);
    }

    /// Business-day deadlines always land on a business day.
    #[test]
    fn business_deadline_is_business_day(
        offset_hours in 0i64..(24 * 365),
        amount in 1u32..30,
        raw in arb_suspensions(),
    ) {
        let calendar = colombia();
        let strategy = DeadlineStrategy::for_unit(TermUnit::BusinessDays, calendar.clone());
        let created = base().add_hours(offset_hours).unwrap();
        let params = CalculationParams::new(created, amount, TermUnit::BusinessDays)
            .with_suspensions(raw);

        let deadline = strategy.calculate(&params).unwrap();
        prop_assert!(calendar.is_business_day(deadline.date()));
        prop_assert!(deadline > created);
    }

    /// Doubling the term is the same as passing twice the amount.
    #[test]
    fn double_term_matches_twice_the_amount(unit in arb_unit(), amount in 1u32..50) {
        let strategy = DeadlineStrategy::for_unit(unit, colombia());
        let doubled = CalculationParams::new(base(), amount, unit).with_double_term(true);
        let twice = CalculationParams::new(base(), amount * 2, unit);
        prop_assert_eq!(strategy.calculate(&doubled).unwrap(), strategy.calculate(&twice).unwrap());
    }
}
