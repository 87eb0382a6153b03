//! Detect overlapping ranges across schedules.
//!
//! For each day, every range of every schedule is compared with every range of
//! every *other* schedule. Ranges within one schedule are never compared; a
//! schedule cannot conflict with itself. Adjacent ranges (one ends exactly when
//! the other starts) are not conflicts.
//!
//! The reported window is `max(starts)..min(ends)` on minute values. For pairs
//! involving an overnight range that window is only indicative: such pairs are
//! flagged as conflicting, their exact shared minutes are not computed.

use serde::Serialize;
use tracing::debug;

use crate::interval::overlaps;
use crate::schedule::{DayOfWeek, ScheduleRef, TimeRange};
use crate::time::TimeOfDay;

/// A range together with the schedule it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcedRange {
    pub schedule_id: String,
    pub schedule_name: String,
    pub owner_label: String,
    pub range: TimeRange,
}

impl SourcedRange {
    fn new(source: &ScheduleRef, range: &TimeRange) -> Self {
        SourcedRange {
            schedule_id: source.schedule_id.clone(),
            schedule_name: source.display_name.clone(),
            owner_label: source.owner_label.clone(),
            range: range.clone(),
        }
    }
}

/// Two ranges from different schedules that share time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub range_a: SourcedRange,
    pub range_b: SourcedRange,
    pub overlap_start: TimeOfDay,
    pub overlap_end: TimeOfDay,
}

impl Conflict {
    /// True when either side wraps past midnight, i.e. the overlap window is
    /// approximate.
    pub fn involves_overnight(&self) -> bool {
        self.range_a.range.is_overnight() || self.range_b.range.is_overnight()
    }
}

/// All conflicts found on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayConflicts {
    pub day: DayOfWeek,
    pub conflicts: Vec<Conflict>,
}

/// Find conflicts between `refs` on all seven days.
///
/// Days without conflicts are left out. Fewer than two schedules yields an
/// empty report.
pub fn find_schedule_conflicts(refs: &[ScheduleRef]) -> Vec<DayConflicts> {
    find_conflicts_on_days(refs, &DayOfWeek::ALL)
}

/// Find conflicts between `refs` on the given days, reported in week order.
pub fn find_conflicts_on_days(refs: &[ScheduleRef], days: &[DayOfWeek]) -> Vec<DayConflicts> {
    if refs.len() < 2 {
        return Vec::new();
    }

    let mut days = days.to_vec();
    days.sort();
    days.dedup();

    days.into_iter()
        .filter_map(|day| {
            let conflicts = find_day_conflicts(refs, day);
            (!conflicts.is_empty()).then_some(DayConflicts { day, conflicts })
        })
        .collect()
}

/// Find conflicts between `refs` on a single day.
///
/// Pairs are reported in flattened order: all ranges of the first schedule,
/// then the second, and so on; `range_a` always precedes `range_b` in that order.
pub fn find_day_conflicts(refs: &[ScheduleRef], day: DayOfWeek) -> Vec<Conflict> {
    let tagged: Vec<(usize, &TimeRange)> = refs
        .iter()
        .enumerate()
        .flat_map(|(source, r)| r.ranges(day).iter().map(move |range| (source, range)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, &(source_a, a)) in tagged.iter().enumerate() {
        for &(source_b, b) in &tagged[i + 1..] {
            if source_a == source_b || !overlaps(a, b) {
                continue;
            }

            let overlap_start = a.start.max(b.start);
            let overlap_end = a.end.min(b.end);

            conflicts.push(Conflict {
                range_a: SourcedRange::new(&refs[source_a], a),
                range_b: SourcedRange::new(&refs[source_b], b),
                overlap_start: TimeOfDay::wrapping(u32::from(overlap_start.minutes())),
                overlap_end: TimeOfDay::wrapping(u32::from(overlap_end.minutes())),
            });
        }
    }

    debug!(
        day = %day,
        ranges = tagged.len(),
        conflicts = conflicts.len(),
        "checked day for conflicts"
    );
    conflicts
}
