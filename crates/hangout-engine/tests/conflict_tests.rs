//! Tests for cross-schedule conflict detection.

use hangout_engine::conflict::find_day_conflicts;
use hangout_engine::{
    find_conflicts_on_days, find_schedule_conflicts, DayOfWeek, Schedule, ScheduleRef, Status,
    TimeRange,
};

/// Helper: a schedule ref with the given ranges on the given days.
fn schedule(id: &str, owner: &str, ranges: &[(DayOfWeek, &str, &str, Status)]) -> ScheduleRef {
    let mut schedule = Schedule::new(id, format!("{}'s week", owner));
    for (i, &(day, start, end, status)) in ranges.iter().enumerate() {
        let title = format!("{}-{}", id, i);
        schedule.add_range(day, TimeRange::new(title, start, end, status).unwrap());
    }
    ScheduleRef::new(schedule, owner)
}

#[test]
fn monday_overlap_reports_shared_window() {
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Monday, "09:00", "17:00", Status::NotFree)],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Monday, "16:00", "18:00", Status::NotFree)],
    );

    let report = find_schedule_conflicts(&[a, b]);

    assert_eq!(report.len(), 1, "only Monday has a conflict");
    assert_eq!(report[0].day, DayOfWeek::Monday);
    assert_eq!(report[0].conflicts.len(), 1);

    let conflict = &report[0].conflicts[0];
    assert_eq!(conflict.overlap_start.to_string(), "16:00");
    assert_eq!(conflict.overlap_end.to_string(), "17:00");
    assert_eq!(conflict.range_a.owner_label, "Ana");
    assert_eq!(conflict.range_b.owner_label, "Ben");
    assert_eq!(conflict.range_a.schedule_id, "a");
    assert_eq!(conflict.range_b.schedule_name, "Ben's week");
}

#[test]
fn ranges_within_one_schedule_never_conflict() {
    let a = schedule(
        "a",
        "Ana",
        &[
            (DayOfWeek::Tuesday, "09:00", "12:00", Status::NotFree),
            (DayOfWeek::Tuesday, "10:00", "11:00", Status::NotFree),
        ],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Wednesday, "09:00", "12:00", Status::NotFree)],
    );

    assert!(find_schedule_conflicts(&[a, b]).is_empty());
}

#[test]
fn adjacent_ranges_are_not_conflicts() {
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Friday, "09:00", "10:00", Status::NotFree)],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Friday, "10:00", "11:00", Status::NotFree)],
    );

    assert!(find_schedule_conflicts(&[a, b]).is_empty());
}

#[test]
fn fewer_than_two_schedules_yield_nothing() {
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Monday, "09:00", "17:00", Status::NotFree)],
    );
    assert!(find_schedule_conflicts(&[]).is_empty());
    assert!(find_schedule_conflicts(&[a]).is_empty());
}

#[test]
fn status_does_not_matter_for_conflicts() {
    // Any overlap between schedules is reported, free or not.
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Sunday, "10:00", "12:00", Status::Free)],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Sunday, "11:00", "13:00", Status::MaybeFree)],
    );

    let report = find_schedule_conflicts(&[a, b]);

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].day, DayOfWeek::Sunday);
}

#[test]
fn multiple_conflicts_across_three_schedules() {
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Thursday, "09:00", "11:00", Status::NotFree)],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Thursday, "10:00", "12:00", Status::NotFree)],
    );
    let c = schedule(
        "c",
        "Cy",
        &[(DayOfWeek::Thursday, "10:30", "10:45", Status::NotFree)],
    );

    let conflicts = find_day_conflicts(&[a, b, c], DayOfWeek::Thursday);

    // a-b, a-c, b-c
    assert_eq!(conflicts.len(), 3);
    assert_eq!(conflicts[0].range_a.schedule_id, "a");
    assert_eq!(conflicts[0].range_b.schedule_id, "b");
    assert_eq!(conflicts[0].overlap_start.to_string(), "10:00");
    assert_eq!(conflicts[0].overlap_end.to_string(), "11:00");
    assert_eq!(conflicts[1].range_b.schedule_id, "c");
    assert_eq!(conflicts[2].range_a.schedule_id, "b");
    assert_eq!(conflicts[2].overlap_start.to_string(), "10:30");
    assert_eq!(conflicts[2].overlap_end.to_string(), "10:45");
}

#[test]
fn days_are_reported_in_week_order_and_empty_days_omitted() {
    let a = schedule(
        "a",
        "Ana",
        &[
            (DayOfWeek::Saturday, "09:00", "10:00", Status::NotFree),
            (DayOfWeek::Monday, "09:00", "10:00", Status::NotFree),
            (DayOfWeek::Wednesday, "09:00", "10:00", Status::NotFree),
        ],
    );
    let b = schedule(
        "b",
        "Ben",
        &[
            (DayOfWeek::Monday, "09:30", "10:30", Status::NotFree),
            (DayOfWeek::Saturday, "08:00", "09:30", Status::NotFree),
        ],
    );

    let days: Vec<DayOfWeek> = find_schedule_conflicts(&[a, b])
        .iter()
        .map(|d| d.day)
        .collect();

    assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Saturday]);
}

#[test]
fn day_subset_limits_the_report() {
    let a = schedule(
        "a",
        "Ana",
        &[
            (DayOfWeek::Monday, "09:00", "10:00", Status::NotFree),
            (DayOfWeek::Tuesday, "09:00", "10:00", Status::NotFree),
        ],
    );
    let b = schedule(
        "b",
        "Ben",
        &[
            (DayOfWeek::Monday, "09:00", "10:00", Status::NotFree),
            (DayOfWeek::Tuesday, "09:00", "10:00", Status::NotFree),
        ],
    );

    let report = find_conflicts_on_days(&[a, b], &[DayOfWeek::Tuesday, DayOfWeek::Tuesday]);

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].day, DayOfWeek::Tuesday);
}

#[test]
fn overnight_pair_is_flagged() {
    let a = schedule(
        "a",
        "Ana",
        &[(DayOfWeek::Friday, "23:00", "02:00", Status::NotFree)],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Friday, "01:00", "03:00", Status::NotFree)],
    );

    let report = find_schedule_conflicts(&[a, b]);

    assert_eq!(report.len(), 1);
    assert!(report[0].conflicts[0].involves_overnight());
}

#[test]
fn swapping_schedules_finds_the_same_pairs() {
    let a = schedule(
        "a",
        "Ana",
        &[
            (DayOfWeek::Monday, "09:00", "12:00", Status::NotFree),
            (DayOfWeek::Monday, "13:00", "15:00", Status::MaybeFree),
        ],
    );
    let b = schedule(
        "b",
        "Ben",
        &[(DayOfWeek::Monday, "11:00", "14:00", Status::NotFree)],
    );

    let pairs = |refs: &[ScheduleRef]| {
        let mut pairs: Vec<(String, String)> = find_schedule_conflicts(refs)
            .into_iter()
            .flat_map(|d| d.conflicts)
            .map(|c| {
                let mut pair = [c.range_a.range.title, c.range_b.range.title];
                pair.sort();
                let [x, y] = pair;
                (x, y)
            })
            .collect();
        pairs.sort();
        pairs
    };

    assert_eq!(pairs(&[a.clone(), b.clone()]), pairs(&[b, a]));
}
