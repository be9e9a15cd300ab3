//! Suspension interval normalization.
//!
//! Turns the caller's raw suspension records into an ascending, pairwise
//! disjoint list of intervals that all start at or after the submission
//! instant. Malformed records are dropped, never reported as errors: one bad
//! record must not abort an otherwise valid deadline computation. Every drop
//! is kept in the result's discard list and logged at debug level.
//!
//! Partial overlaps are resolved by an explicit [`OverlapPolicy`]:
//!
//! ```text
//! previous:  [08:00 ───────── 15:00]
//! current:           [10:00 ───────────── 16:00 (next day)]
//!
//! ShiftStart:      [08:00 ── 15:00][15:00 ── 16:00 (next day)]
//! ExtendPrevious:  [08:00 ─────────────────── 16:00 (next day)]
//! ```
//!
//! Both cover the same total time; they differ in where interval boundaries
//! fall, which matters to consumers that look at the days an interval touches.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Suspension, SuspensionInterval, Timestamp};

/// How a partial overlap with the previously accepted interval is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Move the new interval's start to the previous interval's end.
    ShiftStart,
    /// Stretch the previous interval to the new end and drop the new one.
    ExtendPrevious,
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapPolicy::ShiftStart => f.write_str("shift_start"),
            OverlapPolicy::ExtendPrevious => f.write_str("extend_previous"),
        }
    }
}

/// Why a raw suspension did not survive normalization as its own interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Start or end missing, or not a valid timestamp.
    MissingBoundary,
    /// `end <= start`.
    NonPositiveDuration,
    /// Started before the submission instant.
    BeforeSubmission,
    /// Entirely inside the previously accepted interval.
    Contained,
    /// Folded into the previous interval under [`OverlapPolicy::ExtendPrevious`].
    Merged,
}

/// A raw suspension that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedSuspension {
    /// Identifier of the raw record, if it had one.
    pub id: Option<String>,
    /// Why it was dropped.
    pub reason: DiscardReason,
}

/// Output of [`normalize`]: ascending, pairwise-disjoint intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSuspensions {
    intervals: Vec<SuspensionInterval>,
    discarded: Vec<DiscardedSuspension>,
}

impl NormalizedSuspensions {
    /// The accepted intervals, in ascending order.
    pub fn intervals(&self) -> &[SuspensionInterval] {
        &self.intervals
    }

    /// Records that were dropped, in processing order.
    pub fn discarded(&self) -> &[DiscardedSuspension] {
        &self.discarded
    }

    /// Number of accepted intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True if no interval was accepted.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates the accepted intervals in order.
    pub fn iter(&self) -> impl Iterator<Item = &SuspensionInterval> {
        self.intervals.iter()
    }

    /// Sum of the accepted intervals' durations.
    pub fn total_duration_seconds(&self) -> i64 {
        self.intervals
            .iter()
            .map(SuspensionInterval::duration_seconds)
            .sum()
    }

    /// Sum of the accepted intervals' durations as a `TimeDelta`.
    pub fn total_duration(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.total_duration_seconds()).unwrap_or(TimeDelta::MAX)
    }
}

/// Normalizes raw suspensions against a submission lower bound.
///
/// 1. Records missing a boundary are dropped.
/// 2. The rest are sorted by start (stable, so ties keep input order).
/// 3. Zero/negative durations and starts before `lower_bound` are dropped.
/// 4. Intervals ending at or before the last accepted end are dropped as
///    contained; partial overlaps are resolved by `policy`.
pub fn normalize(
    raw: &[Suspension],
    lower_bound: Timestamp,
    policy: OverlapPolicy,
) -> NormalizedSuspensions {
    let mut out = NormalizedSuspensions::default();

    let mut candidates: Vec<(Option<&str>, SuspensionInterval)> = Vec::with_capacity(raw.len());
    for record in raw {
        match record.interval() {
            Some(interval) => candidates.push((record.id.as_deref(), interval)),
            None => out.discard(record.id.as_deref(), DiscardReason::MissingBoundary),
        }
    }

    candidates.sort_by_key(|(_, interval)| interval.start);

    for (id, interval) in candidates {
        if !interval.is_valid() {
            out.discard(id, DiscardReason::NonPositiveDuration);
            continue;
        }
        if interval.start < lower_bound {
            out.discard(id, DiscardReason::BeforeSubmission);
            continue;
        }

        let mut current = interval;
        if let Some(last) = out.intervals.last_mut() {
            // Starts are ascending and accepted intervals are contiguous back
            // to their block's first start, so the end alone decides
            // containment even after an earlier start was shifted.
            if current.end <= last.end {
                out.discard(id, DiscardReason::Contained);
                continue;
            }
            if current.start < last.end && current.end > last.end {
                match policy {
                    OverlapPolicy::ShiftStart => current.start = last.end,
                    OverlapPolicy::ExtendPrevious => {
                        last.end = current.end;
                        out.discard(id, DiscardReason::Merged);
                        continue;
                    }
                }
            }
        }
        out.intervals.push(current);
    }

    out
}

impl NormalizedSuspensions {
    fn discard(&mut self, id: Option<&str>, reason: DiscardReason) {
        tracing::debug!(id = ?id, reason = ?reason, "suspension discarded");
        self.discarded.push(DiscardedSuspension {
            id: id.map(str::to_string),
            reason,
        });
    }
}
