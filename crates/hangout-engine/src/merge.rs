//! Coalesce overlapping same-status ranges within one day.
//!
//! Sorts ranges by start time, then scans left to right, folding each range
//! into the most recent merged range of the same status when the two overlap.
//! A folded range extends the end to the later of the two ends and appends its
//! title with `", "`.
//!
//! Ranges of different status are never merged, even when one contains the
//! other: a "Free" lunch inside a "Not Free" workday stays a separate entry.

use tracing::debug;

use crate::interval::overlaps;
use crate::schedule::{Schedule, TimeRange};

/// Merge overlapping ranges of equal status.
///
/// The result is ordered by start time (ties keep input order) and no two
/// ranges with the same status overlap. Merging an already-merged list returns
/// it unchanged.
pub fn merge_ranges(ranges: &[TimeRange]) -> Vec<TimeRange> {
    if ranges.len() < 2 {
        return ranges.to_vec();
    }

    // `sort_by_key` is stable, so equal starts keep their input order.
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.start);

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        // A different-status range in between does not end a same-status run.
        let accumulator = merged.iter().rposition(|m| m.status == range.status);
        match accumulator {
            Some(i) if overlaps(&merged[i], &range) => absorb(&mut merged[i], range),
            _ => merged.push(range),
        }
    }

    settle(&mut merged);

    debug!(
        input = ranges.len(),
        output = merged.len(),
        "merged day ranges"
    );
    merged
}

/// Merge every day of `schedule`.
pub fn merge_schedule(schedule: &Schedule) -> Schedule {
    let mut merged = schedule.clone();
    for (day, day_schedule) in schedule.days() {
        merged.day_mut(day).time_ranges = merge_ranges(&day_schedule.time_ranges);
    }
    merged
}

/// Fold `other` into `into`: later end wins, titles accumulate once each.
fn absorb(into: &mut TimeRange, other: TimeRange) {
    if other.end > into.end {
        into.end = other.end;
    }

    if other.title.is_empty() || into.title.split(", ").any(|t| t == other.title) {
        return;
    }
    if into.title.is_empty() {
        into.title = other.title;
    } else {
        into.title = format!("{}, {}", into.title, other.title);
    }
}

/// The scan only compares neighbours in start order. An overnight range can
/// still overlap an earlier same-status range that starts after midnight, so
/// keep folding until no same-status pair overlaps.
fn settle(merged: &mut Vec<TimeRange>) {
    while let Some((i, j)) = same_status_overlap(merged) {
        let later = merged.remove(j);
        absorb(&mut merged[i], later);
    }
}

fn same_status_overlap(ranges: &[TimeRange]) -> Option<(usize, usize)> {
    (0..ranges.len()).find_map(|i| {
        (i + 1..ranges.len())
            .find(|&j| ranges[i].status == ranges[j].status && overlaps(&ranges[i], &ranges[j]))
            .map(|j| (i, j))
    })
}
