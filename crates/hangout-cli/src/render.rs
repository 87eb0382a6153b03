//! Plain-text rendering of engine results.

use std::fmt::Write;

use hangout_engine::availability::GridCell;
use hangout_engine::conflict::SourcedRange;
use hangout_engine::freebusy::DayFreeSlots;
use hangout_engine::stats::ScheduleStats;
use hangout_engine::time::MINUTES_PER_DAY;
use hangout_engine::{
    DayConflicts, DayOfWeek, FreeSlot, GroupStatus, Schedule, ScheduleRef, TimeOfDay, TimeRange,
};

use crate::StatusReport;

/// How times of day are written.
#[derive(Clone, Copy)]
pub struct Clock {
    twelve_hour: bool,
}

impl Clock {
    pub fn new(twelve_hour: bool) -> Self {
        Clock { twelve_hour }
    }

    /// `"09:00"`, or `"9:00 AM"` on a twelve-hour clock. `24:00` reads as
    /// midnight.
    pub fn time(self, t: TimeOfDay) -> String {
        let minutes = t.minutes() % MINUTES_PER_DAY;
        let (hour, minute) = (minutes / 60, minutes % 60);
        if !self.twelve_hour {
            return format!("{:02}:{:02}", hour, minute);
        }
        let period = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, minute, period)
    }

    fn span(self, start: TimeOfDay, end: TimeOfDay) -> String {
        format!("{}-{}", self.time(start), self.time(end))
    }

    fn hour(self, hour: u8) -> String {
        self.time(TimeOfDay::wrapping(u32::from(hour) * 60))
    }
}

/// Name shown for a schedule: its owner, else its own name, else its id.
pub fn label(r: &ScheduleRef) -> String {
    [&r.owner_label, &r.display_name, &r.schedule_id]
        .into_iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| "unnamed".to_string())
}

pub fn duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

fn group(status: GroupStatus) -> &'static str {
    match status {
        GroupStatus::AllFree => "all free",
        GroupStatus::SomeFree => "some free",
        GroupStatus::NoneFree => "none free",
    }
}

fn range_line(out: &mut String, range: &TimeRange, clock: Clock) {
    let _ = writeln!(
        out,
        "    {}  {:<10}  {}",
        clock.span(range.start, range.end),
        range.status,
        range.title
    );
}

pub fn schedule(schedule: &Schedule, clock: Clock) -> String {
    let mut out = String::new();
    let title = if schedule.name.is_empty() {
        &schedule.id
    } else {
        &schedule.name
    };
    let _ = writeln!(out, "{}", title);
    for (day, day_schedule) in schedule.days() {
        if day_schedule.time_ranges.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}", day);
        for range in &day_schedule.time_ranges {
            range_line(&mut out, range, clock);
        }
    }
    out
}

fn sourced(side: &SourcedRange, clock: Clock) -> String {
    let who = if side.owner_label.is_empty() {
        &side.schedule_name
    } else {
        &side.owner_label
    };
    format!(
        "{}: {} ({}, {})",
        who,
        side.range.title,
        clock.span(side.range.start, side.range.end),
        side.range.status
    )
}

pub fn conflicts(report: &[DayConflicts], clock: Clock) -> String {
    if report.is_empty() {
        return "No conflicts.\n".to_string();
    }
    let mut out = String::new();
    for day in report {
        let _ = writeln!(out, "{}", day.day);
        for c in &day.conflicts {
            let note = if c.involves_overnight() {
                "  (overnight, approximate)"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {}  {} <> {}{}",
                clock.span(c.overlap_start, c.overlap_end),
                sourced(&c.range_a, clock),
                sourced(&c.range_b, clock),
                note
            );
        }
    }
    out
}

fn slot_lines(out: &mut String, slots: &[FreeSlot], clock: Clock) {
    for slot in slots {
        let _ = writeln!(
            out,
            "  {}  {}",
            clock.span(slot.start, slot.end),
            duration(slot.duration_minutes)
        );
    }
}

pub fn free_slots(day: DayOfWeek, slots: &[FreeSlot], clock: Clock) -> String {
    if slots.is_empty() {
        return format!("No common free time on {}.\n", day);
    }
    let mut out = format!("Free on {}:\n", day);
    slot_lines(&mut out, slots, clock);
    out
}

pub fn week(week: &[DayFreeSlots], clock: Clock) -> String {
    if week.is_empty() {
        return "No common free time this week.\n".to_string();
    }
    let mut out = String::new();
    for day in week {
        let _ = writeln!(out, "{}", day.day);
        slot_lines(&mut out, &day.slots, clock);
    }
    out
}

pub fn status(report: &StatusReport, clock: Clock) -> String {
    if let [only] = report.schedules.as_slice() {
        return format!(
            "{} {}: {}\n",
            report.day,
            clock.time(report.at),
            only.status
        );
    }
    let mut out = format!(
        "{} {}: {}\n",
        report.day,
        clock.time(report.at),
        group(report.group)
    );
    for s in &report.schedules {
        let _ = writeln!(out, "  {}  {}", s.name, s.status);
    }
    out
}

pub fn grid(day: DayOfWeek, cells: &[GridCell], schedules: usize, clock: Clock) -> String {
    let mut out = format!("{}\n", day);
    for cell in cells {
        let _ = writeln!(
            out,
            "  {:>8}  {:<9}  {}/{} free",
            clock.time(cell.time),
            group(cell.status),
            cell.free_count,
            schedules
        );
    }
    out
}

pub fn stats(name: &str, stats: &ScheduleStats, clock: Clock) -> String {
    let d = &stats.status_distribution;
    let mut out = format!("{}\n", name);
    let _ = writeln!(
        out,
        "  ranges: {} free, {} maybe free, {} not free",
        d.free, d.maybe_free, d.not_free
    );
    for day in &stats.days {
        let _ = writeln!(
            out,
            "  {:<9}  {:>2} ranges  {:>7}  {:>3}%",
            day.day.name(),
            day.range_count,
            duration(day.total_minutes),
            day.utilization_percent
        );
    }
    match stats.peak_hour {
        Some(hour) => {
            let _ = writeln!(out, "  peak hour: {}", clock.hour(hour));
        }
        None => {
            let _ = writeln!(out, "  peak hour: none");
        }
    }
    let _ = writeln!(out, "  quiet hour: {}", clock.hour(stats.quiet_hour));
    let _ = writeln!(out, "  active hours: {}", stats.active_hours);
    let _ = writeln!(
        out,
        "  busiest day: {}, quietest day: {}",
        stats.busiest_day, stats.quietest_day
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse_end(s).unwrap()
    }

    #[test]
    fn twelve_hour_clock() {
        let clock = Clock::new(true);
        assert_eq!(clock.time(t("00:00")), "12:00 AM");
        assert_eq!(clock.time(t("09:05")), "9:05 AM");
        assert_eq!(clock.time(t("12:30")), "12:30 PM");
        assert_eq!(clock.time(t("23:59")), "11:59 PM");
        assert_eq!(clock.time(t("24:00")), "12:00 AM");
    }

    #[test]
    fn twenty_four_hour_clock() {
        let clock = Clock::new(false);
        assert_eq!(clock.time(t("07:00")), "07:00");
        assert_eq!(clock.time(t("24:00")), "00:00");
    }

    #[test]
    fn durations() {
        assert_eq!(duration(45), "45m");
        assert_eq!(duration(120), "2h");
        assert_eq!(duration(150), "2h 30m");
        assert_eq!(duration(0), "0m");
    }
}
