//! Integration tests for the `hangout` CLI binary.
//!
//! These run the real binary over the JSON fixtures, through files and stdin,
//! in both text and JSON output.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: `hangout` with Ana's and Ben's schedules as inputs.
fn hangout_with_both() -> Command {
    let mut cmd = Command::cargo_bin("hangout").unwrap();
    cmd.args(["-i", &fixture("ana.json"), "-i", &fixture("ben.json")]);
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_between_two_files() {
    hangout_with_both()
        .arg("conflicts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday"))
        .stdout(predicate::str::contains("16:00-17:00"))
        .stdout(predicate::str::contains("Ana: Work (09:00-17:00, Not Free)"))
        .stdout(predicate::str::contains("Ben: Gym (16:00-18:00, Not Free)"))
        .stdout(predicate::str::contains("Saturday").not());
}

#[test]
fn conflicts_as_json() {
    let mut cmd = hangout_with_both();
    cmd.args(["conflicts", "--format", "json"]);
    let report = stdout_json(&mut cmd);

    let days = report.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["day"], "Monday");
    let conflict = &days[0]["conflicts"][0];
    assert_eq!(conflict["overlap_start"], "16:00");
    assert_eq!(conflict["overlap_end"], "17:00");
    assert_eq!(conflict["range_a"]["owner_label"], "Ana");
    assert_eq!(conflict["range_b"]["range"]["title"], "Gym");
}

#[test]
fn conflicts_limited_to_other_days_are_empty() {
    hangout_with_both()
        .args(["conflicts", "--day", "tue", "--day", "Saturday"])
        .assert()
        .success()
        .stdout("No conflicts.\n");
}

#[test]
fn single_schedule_has_no_conflicts() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["conflicts", "-i", &fixture("ana.json")])
        .assert()
        .success()
        .stdout("No conflicts.\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// free / week
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_slots_on_saturday() {
    hangout_with_both()
        .args(["free", "--day", "saturday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Free on Saturday:"))
        .stdout(predicate::str::contains("00:00-10:00  10h"))
        .stdout(predicate::str::contains("12:00-14:00  2h"))
        .stdout(predicate::str::contains("16:00-00:00  8h"));
}

#[test]
fn maybe_free_can_count_as_available() {
    let mut cmd = hangout_with_both();
    cmd.args([
        "free",
        "--day",
        "sat",
        "--maybe-is-free",
        "--first",
        "--format",
        "json",
    ]);
    let slots = stdout_json(&mut cmd);

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["start"], "00:00");
    assert_eq!(slots[0]["end"], "14:00");
    assert_eq!(slots[0]["duration_minutes"], 840);
}

#[test]
fn free_slots_on_a_twelve_hour_clock() {
    hangout_with_both()
        .args(["free", "--day", "saturday", "--twelve-hour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12:00 PM-2:00 PM"));
}

#[test]
fn overnight_sleep_blocks_both_ends_of_sunday() {
    let mut cmd = hangout_with_both();
    cmd.args(["free", "--day", "sunday", "--format", "json"]);
    let slots = stdout_json(&mut cmd);

    assert_eq!(slots[0]["start"], "07:00");
    assert_eq!(slots[0]["end"], "23:00");
    assert_eq!(slots.as_array().unwrap().len(), 1);
}

#[test]
fn minimum_duration_from_environment() {
    let week = stdout_json(
        hangout_with_both()
            .env("HANGOUT_MIN_DURATION", "600")
            .args(["week", "--format", "json"]),
    );

    let days: Vec<&str> = week
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["day"].as_str().unwrap())
        .collect();
    assert_eq!(
        days,
        [
            "Sunday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ]
    );
}

#[test]
fn free_without_schedules_fails() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["free", "--day", "monday"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No schedules given"));
}

// ─────────────────────────────────────────────────────────────────────────────
// status / grid
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn group_status_from_stdin_array() {
    let team = std::fs::read_to_string(fixture("team.json")).unwrap();

    for (at, expected) in [
        ("08:00", "Monday 08:00: all free"),
        ("10:00", "Monday 10:00: some free"),
        ("16:30", "Monday 16:30: none free"),
    ] {
        Command::cargo_bin("hangout")
            .unwrap()
            .args(["status", "--day", "monday", "--at", at])
            .write_stdin(team.clone())
            .assert()
            .success()
            .stdout(predicate::str::starts_with(expected));
    }
}

#[test]
fn single_schedule_status() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args([
            "status",
            "-i",
            &fixture("ana.json"),
            "--day",
            "sunday",
            "--at",
            "03:00",
        ])
        .assert()
        .success()
        .stdout("Sunday 03:00: Not Free\n");
}

#[test]
fn status_rejects_malformed_time() {
    hangout_with_both()
        .args(["status", "--day", "monday", "--at", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--at"));
}

#[test]
fn grid_counts_free_schedules() {
    hangout_with_both()
        .args(["grid", "--day", "monday", "--from", "8", "--to", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00  all free   2/2 free"))
        .stdout(predicate::str::contains("09:00  some free  1/2 free"))
        .stdout(predicate::str::contains("10:00").not());
}

#[test]
fn grid_rejects_backwards_hours() {
    hangout_with_both()
        .args(["grid", "--day", "monday", "--from", "18", "--to", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from and --to"));
}

// ─────────────────────────────────────────────────────────────────────────────
// merge / stats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merge_prints_a_schedule_document() {
    let doc = stdout_json(
        Command::cargo_bin("hangout")
            .unwrap()
            .args([
                "merge",
                "--format",
                "json",
                "-i",
                &fixture("overlapping.json"),
            ]),
    );

    assert_eq!(doc["name"], "Messy Monday");
    let monday = doc["schedule"]["Monday"]["timeRanges"].as_array().unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0]["title"], "Work, Gym");
    assert_eq!(monday[0]["start"], "09:00");
    assert_eq!(monday[0]["end"], "14:00");
    assert_eq!(monday[1]["status"], "Free");
}

#[test]
fn merge_text_lists_ranges_by_day() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["merge", "-i", &fixture("overlapping.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Messy Monday\n  Monday\n"))
        .stdout(predicate::str::contains("09:00-14:00  Not Free    Work, Gym"));
}

#[test]
fn stats_text() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["stats", "-i", &fixture("ana.json")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Ana\n"))
        .stdout(predicate::str::contains("ranges: 0 free, 1 maybe free, 2 not free"))
        .stdout(predicate::str::contains("active hours: 16"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Input and output handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn malformed_time_is_reported_not_defaulted() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["stats", "-i", &fixture("malformed_time.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schedule document #1"))
        .stderr(predicate::str::contains("9:00"));
}

#[test]
fn missing_file_fails() {
    Command::cargo_bin("hangout")
        .unwrap()
        .args(["stats", "-i", "/nonexistent/schedule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn unknown_day_is_rejected() {
    hangout_with_both()
        .args(["free", "--day", "funday"])
        .assert()
        .failure();
}

#[test]
fn writes_output_file() {
    let output_path = std::env::temp_dir().join("hangout-test-conflicts.json");
    let _ = std::fs::remove_file(&output_path);

    hangout_with_both()
        .args(["conflicts", "--format", "json", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let report: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report[0]["day"], "Monday");

    let _ = std::fs::remove_file(&output_path);
}
