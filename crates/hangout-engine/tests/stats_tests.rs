//! Tests for schedule statistics.

use hangout_engine::{schedule_stats, DayOfWeek, Schedule, Status, TimeRange};

fn range(start: &str, end: &str, status: Status) -> TimeRange {
    TimeRange::new("r", start, end, status).unwrap()
}

#[test]
fn empty_schedule_has_no_peak() {
    let stats = schedule_stats(&Schedule::new("s", "s"));

    assert_eq!(stats.days.len(), 7);
    assert_eq!(stats.peak_hour, None);
    assert_eq!(stats.quiet_hour, 0);
    assert_eq!(stats.active_hours, 0);
    assert_eq!(stats.busiest_day, DayOfWeek::Sunday);
    assert_eq!(stats.quietest_day, DayOfWeek::Sunday);
}

#[test]
fn counts_ranges_and_minutes_per_status() {
    let mut schedule = Schedule::new("s", "s");
    schedule.add_range(DayOfWeek::Monday, range("09:00", "17:00", Status::NotFree));
    schedule.add_range(DayOfWeek::Monday, range("12:00", "13:00", Status::Free));
    schedule.add_range(
        DayOfWeek::Monday,
        range("18:00", "19:30", Status::MaybeFree),
    );
    schedule.add_range(DayOfWeek::Tuesday, range("10:00", "11:00", Status::NotFree));

    let stats = schedule_stats(&schedule);

    assert_eq!(stats.status_distribution.not_free, 2);
    assert_eq!(stats.status_distribution.count(Status::Free), 1);
    assert_eq!(stats.status_distribution.maybe_free, 1);

    let monday = &stats.days[DayOfWeek::Monday.index()];
    assert_eq!(monday.range_count, 3);
    assert_eq!(monday.not_free_minutes, 480);
    assert_eq!(monday.free_minutes, 60);
    assert_eq!(monday.maybe_free_minutes, 90);
    assert_eq!(monday.total_minutes, 630);
    // 630 / 1440 = 43.75%
    assert_eq!(monday.utilization_percent, 44);

    assert_eq!(stats.busiest_day, DayOfWeek::Monday);
    assert_eq!(stats.quietest_day, DayOfWeek::Sunday);
}

#[test]
fn overnight_ranges_count_wrapped_duration() {
    let mut schedule = Schedule::new("s", "s");
    schedule.add_range(DayOfWeek::Friday, range("23:00", "07:00", Status::NotFree));

    let stats = schedule_stats(&schedule);

    let friday = &stats.days[DayOfWeek::Friday.index()];
    assert_eq!(friday.not_free_minutes, 480);
    assert_eq!(stats.hourly_activity[23], 1);
    assert_eq!(stats.hourly_activity[3], 1);
    assert_eq!(stats.hourly_activity[12], 0);
    assert_eq!(stats.active_hours, 8);
}

#[test]
fn peak_hour_is_the_most_touched_hour() {
    let mut schedule = Schedule::new("s", "s");
    for day in [DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday] {
        schedule.add_range(day, range("10:00", "11:00", Status::NotFree));
    }
    schedule.add_range(DayOfWeek::Tuesday, range("08:00", "12:00", Status::NotFree));

    let stats = schedule_stats(&schedule);

    assert_eq!(stats.peak_hour, Some(10));
    assert_eq!(stats.hourly_activity[10], 4);
    assert_eq!(stats.hourly_activity[8], 1);
    assert_eq!(stats.quiet_hour, 0);
}
