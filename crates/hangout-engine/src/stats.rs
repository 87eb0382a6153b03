//! Summary statistics for a single schedule.
//!
//! Durations count the wrapped part of overnight ranges. Ranges are taken as
//! stored, not merged first, so overlapping ranges count twice and a day's
//! utilization can exceed 100%.

use serde::Serialize;

use crate::schedule::{DayOfWeek, Schedule, Status, TimeRange};
use crate::time::MINUTES_PER_DAY;

/// Number of ranges per status across the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    pub free: usize,
    pub maybe_free: usize,
    pub not_free: usize,
}

impl StatusDistribution {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Free => self.free,
            Status::MaybeFree => self.maybe_free,
            Status::NotFree => self.not_free,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayStats {
    pub day: DayOfWeek,
    pub range_count: usize,
    pub total_minutes: u32,
    pub free_minutes: u32,
    pub maybe_free_minutes: u32,
    pub not_free_minutes: u32,
    /// `total_minutes` as a rounded percentage of the day.
    pub utilization_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub status_distribution: StatusDistribution,
    /// One entry per day, Sunday first.
    pub days: Vec<DayStats>,
    /// For each hour of the day, how many ranges touch it across the week.
    pub hourly_activity: [u32; 24],
    /// Hour with the most activity; `None` for an empty schedule.
    pub peak_hour: Option<u8>,
    /// First hour with the least activity.
    pub quiet_hour: u8,
    /// Hours touched by at least one range.
    pub active_hours: usize,
    /// Day with the most ranges (earliest in the week on ties).
    pub busiest_day: DayOfWeek,
    /// Day with the fewest ranges (earliest in the week on ties).
    pub quietest_day: DayOfWeek,
}

/// Compute statistics for `schedule`.
pub fn schedule_stats(schedule: &Schedule) -> ScheduleStats {
    let mut status_distribution = StatusDistribution::default();
    let mut hourly_activity = [0u32; 24];
    let mut days = Vec::with_capacity(DayOfWeek::ALL.len());

    for (day, day_schedule) in schedule.days() {
        let mut stats = DayStats {
            day,
            range_count: day_schedule.time_ranges.len(),
            total_minutes: 0,
            free_minutes: 0,
            maybe_free_minutes: 0,
            not_free_minutes: 0,
            utilization_percent: 0,
        };

        for range in &day_schedule.time_ranges {
            let minutes = range.duration_minutes();
            stats.total_minutes += minutes;
            match range.status {
                Status::Free => {
                    status_distribution.free += 1;
                    stats.free_minutes += minutes;
                }
                Status::MaybeFree => {
                    status_distribution.maybe_free += 1;
                    stats.maybe_free_minutes += minutes;
                }
                Status::NotFree => {
                    status_distribution.not_free += 1;
                    stats.not_free_minutes += minutes;
                }
            }
            for hour in touched_hours(range) {
                hourly_activity[hour] += 1;
            }
        }

        let day_minutes = u32::from(MINUTES_PER_DAY);
        stats.utilization_percent = (stats.total_minutes * 100 + day_minutes / 2) / day_minutes;
        days.push(stats);
    }

    let max_activity = hourly_activity.iter().copied().max().unwrap_or(0);
    let min_activity = hourly_activity.iter().copied().min().unwrap_or(0);
    let peak_hour = (max_activity > 0)
        .then(|| hourly_activity.iter().position(|&a| a == max_activity))
        .flatten()
        .map(|h| h as u8);
    let quiet_hour = hourly_activity
        .iter()
        .position(|&a| a == min_activity)
        .unwrap_or(0) as u8;
    let active_hours = hourly_activity.iter().filter(|&&a| a > 0).count();

    let busiest_day = days
        .iter()
        .fold(&days[0], |best, d| {
            if d.range_count > best.range_count {
                d
            } else {
                best
            }
        })
        .day;
    let quietest_day = days
        .iter()
        .fold(&days[0], |best, d| {
            if d.range_count < best.range_count {
                d
            } else {
                best
            }
        })
        .day;

    ScheduleStats {
        status_distribution,
        days,
        hourly_activity,
        peak_hour,
        quiet_hour,
        active_hours,
        busiest_day,
        quietest_day,
    }
}

/// Hours of the day containing at least one minute of `range`.
fn touched_hours(range: &TimeRange) -> Vec<usize> {
    let start = usize::from(range.start.minutes());
    let end = usize::from(range.end.minutes());
    let hours = |from: usize, to: usize| (from / 60)..to.div_ceil(60);

    if range.is_overnight() {
        hours(start, usize::from(MINUTES_PER_DAY))
            .chain(hours(0, end))
            .collect()
    } else if start < end {
        hours(start, end).collect()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touched_hours_rounds_partial_hours_up() {
        let range = TimeRange::new("", "09:30", "11:15", Status::NotFree).unwrap();
        assert_eq!(touched_hours(&range), vec![9, 10, 11]);
    }

    #[test]
    fn touched_hours_wraps_overnight() {
        let range = TimeRange::new("", "23:00", "01:00", Status::NotFree).unwrap();
        assert_eq!(touched_hours(&range), vec![23, 0]);
    }
}
