//! Point-in-time availability lookups.
//!
//! [`status_at`] answers "what is this person doing at 14:30 on Monday?" for a
//! single schedule. [`group_status_at`] and [`availability_grid`] fold several
//! schedules into the three-way view a comparison calendar colours its cells
//! with: everyone free, some free, nobody free.

use serde::Serialize;

use crate::interval::is_within;
use crate::schedule::{DayOfWeek, Schedule, ScheduleRef, Status};
use crate::time::TimeOfDay;

/// Combined status of several schedules at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupStatus {
    /// Every schedule is free.
    AllFree,
    /// At least one schedule is free or maybe free, but not all are free.
    SomeFree,
    /// Every schedule is not free.
    NoneFree,
}

impl GroupStatus {
    /// Same spelling as the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupStatus::AllFree => "AllFree",
            GroupStatus::SomeFree => "SomeFree",
            GroupStatus::NoneFree => "NoneFree",
        }
    }
}

/// One cell of an availability grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub time: TimeOfDay,
    pub status: GroupStatus,
    /// How many schedules are plainly "Free" at `time`.
    pub free_count: usize,
}

/// The status of `schedule` at `time` on `day`.
///
/// The first range containing `time` decides, in stored order. A time no range
/// covers is free.
pub fn status_at(schedule: &Schedule, day: DayOfWeek, time: TimeOfDay) -> Status {
    schedule
        .ranges(day)
        .iter()
        .find(|range| is_within(time, range))
        .map_or(Status::Free, |range| range.status)
}

/// Fold the statuses of all `refs` at `time` on `day`.
///
/// No schedules at all counts as everyone free.
pub fn group_status_at(refs: &[ScheduleRef], day: DayOfWeek, time: TimeOfDay) -> GroupStatus {
    cell(refs, day, time).status
}

/// Group status at each of `times` on `day`, e.g. every hour from
/// [`generate_time_slots`](crate::time::generate_time_slots).
pub fn availability_grid(
    refs: &[ScheduleRef],
    day: DayOfWeek,
    times: &[TimeOfDay],
) -> Vec<GridCell> {
    times.iter().map(|&time| cell(refs, day, time)).collect()
}

fn cell(refs: &[ScheduleRef], day: DayOfWeek, time: TimeOfDay) -> GridCell {
    let statuses: Vec<Status> = refs
        .iter()
        .map(|r| status_at(&r.schedule, day, time))
        .collect();

    let free_count = statuses.iter().filter(|&&s| s == Status::Free).count();
    let status = if free_count == statuses.len() {
        GroupStatus::AllFree
    } else if statuses.iter().all(|&s| s == Status::NotFree) {
        GroupStatus::NoneFree
    } else {
        GroupStatus::SomeFree
    };

    GridCell {
        time,
        status,
        free_count,
    }
}
