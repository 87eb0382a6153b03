//! Compute free time shared by every schedule on a day.
//!
//! Marks every minute of the day that some schedule blocks, then walks the day
//! collecting maximal unblocked runs. Only runs of at least the requested
//! length are reported.
//!
//! Which statuses block time is an [`OccupancyPolicy`]. By default anything
//! that is not explicitly "Free" blocks, so "Maybe Free" counts as taken. A
//! range marked "Free" never blocks, and minutes no range mentions are free.

use serde::Serialize;
use tracing::debug;

use crate::schedule::{DayOfWeek, ScheduleRef, Status, TimeRange};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

const DAY: usize = MINUTES_PER_DAY as usize;

/// A free time slot.
///
/// A slot that runs to midnight has `end` `00:00`; `duration_minutes` is
/// always the true length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u32,
}

/// Which statuses take time away from a common free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OccupancyPolicy {
    /// "Not Free" and "Maybe Free" both block.
    #[default]
    NotFreeAndMaybe,
    /// Only "Not Free" blocks; "Maybe Free" is treated as available.
    NotFreeOnly,
}

impl OccupancyPolicy {
    pub fn occupies(self, status: Status) -> bool {
        match self {
            OccupancyPolicy::NotFreeAndMaybe => status != Status::Free,
            OccupancyPolicy::NotFreeOnly => status == Status::NotFree,
        }
    }
}

/// Free slots of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayFreeSlots {
    pub day: DayOfWeek,
    pub slots: Vec<FreeSlot>,
}

/// Find the free slots on `day` shared by all `refs`, at least
/// `min_duration_minutes` long, using the default occupancy policy.
///
/// Returns slots sorted by start time. No schedules yields no slots.
pub fn find_common_free_time(
    refs: &[ScheduleRef],
    day: DayOfWeek,
    min_duration_minutes: u32,
) -> Vec<FreeSlot> {
    find_common_free_time_with(refs, day, min_duration_minutes, OccupancyPolicy::default())
}

/// Same as [`find_common_free_time`] with an explicit occupancy policy.
pub fn find_common_free_time_with(
    refs: &[ScheduleRef],
    day: DayOfWeek,
    min_duration_minutes: u32,
    policy: OccupancyPolicy,
) -> Vec<FreeSlot> {
    if refs.is_empty() {
        return Vec::new();
    }

    let occupied = occupancy_mask(refs, day, policy);

    let mut slots = Vec::new();
    let mut run_start: Option<usize> = None;
    for (minute, &taken) in occupied.iter().enumerate() {
        match (taken, run_start) {
            (false, None) => run_start = Some(minute),
            (true, Some(start)) => {
                push_slot(&mut slots, start, minute, min_duration_minutes);
                run_start = None;
            }
            _ => {}
        }
    }
    // A run still open at midnight ends with the day.
    if let Some(start) = run_start {
        push_slot(&mut slots, start, DAY, min_duration_minutes);
    }

    debug!(day = %day, schedules = refs.len(), slots = slots.len(), "computed common free time");
    slots
}

/// The first common free slot of at least `min_duration_minutes` on `day`.
pub fn find_first_common_free_slot(
    refs: &[ScheduleRef],
    day: DayOfWeek,
    min_duration_minutes: u32,
) -> Option<FreeSlot> {
    find_first_common_free_slot_with(refs, day, min_duration_minutes, OccupancyPolicy::default())
}

/// Same as [`find_first_common_free_slot`] with an explicit occupancy policy.
pub fn find_first_common_free_slot_with(
    refs: &[ScheduleRef],
    day: DayOfWeek,
    min_duration_minutes: u32,
    policy: OccupancyPolicy,
) -> Option<FreeSlot> {
    find_common_free_time_with(refs, day, min_duration_minutes, policy)
        .into_iter()
        .next()
}

/// Common free slots for every day of the week. Days without a slot are left
/// out.
pub fn find_weekly_common_free_time(
    refs: &[ScheduleRef],
    min_duration_minutes: u32,
    policy: OccupancyPolicy,
) -> Vec<DayFreeSlots> {
    DayOfWeek::ALL
        .into_iter()
        .filter_map(|day| {
            let slots = find_common_free_time_with(refs, day, min_duration_minutes, policy);
            (!slots.is_empty()).then_some(DayFreeSlots { day, slots })
        })
        .collect()
}

/// One flag per minute of `day`, set where any schedule blocks time.
fn occupancy_mask(refs: &[ScheduleRef], day: DayOfWeek, policy: OccupancyPolicy) -> Vec<bool> {
    let mut occupied = vec![false; DAY];
    refs.iter()
        .flat_map(|r| r.ranges(day))
        .filter(|range| policy.occupies(range.status))
        .for_each(|range| mark(&mut occupied, range));
    occupied
}

fn mark(occupied: &mut [bool], range: &TimeRange) {
    let start = usize::from(range.start.minutes());
    let end = usize::from(range.end.minutes());
    if range.is_overnight() {
        occupied[start..].fill(true);
        occupied[..end].fill(true);
    } else {
        occupied[start..end].fill(true);
    }
}

fn push_slot(slots: &mut Vec<FreeSlot>, start: usize, end: usize, min_duration_minutes: u32) {
    let duration_minutes = (end - start) as u32;
    if duration_minutes >= min_duration_minutes {
        slots.push(FreeSlot {
            start: TimeOfDay::wrapping(start as u32),
            end: TimeOfDay::wrapping(end as u32),
            duration_minutes,
        });
    }
}
