//! # hangout-engine-python
//!
//! Python bindings for hangout-engine, built with PyO3.
//!
//! Exposes the following functions to Python as the `hangout_engine` module:
//!
//! - `time_to_minutes(time)` / `minutes_to_time(minutes)`
//! - `merge_time_ranges(ranges_json)` -- merged ranges as a JSON string
//! - `find_schedule_conflicts(schedules_json)` -- conflicts by day as JSON
//! - `find_common_free_time(schedules_json, day, ...)` -- free slots as JSON
//! - `find_first_common_free_slot(schedules_json, day, ...)` -- one slot or `"null"`
//! - `get_time_slot_status` / `get_group_status` -- status at one instant
//! - `get_schedule_stats(schedule_json)` -- statistics as JSON

use hangout_engine::freebusy::{find_common_free_time_with, find_first_common_free_slot_with};
use hangout_engine::{
    DayOfWeek, EngineError, OccupancyPolicy, Schedule, ScheduleRef, TimeOfDay, TimeRange,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn value_err(e: EngineError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

fn parse_refs(json: &str) -> PyResult<Vec<ScheduleRef>> {
    serde_json::from_str(json)
        .map_err(|e| PyValueError::new_err(format!("Invalid schedules JSON: {}", e)))
}

fn parse_day(day: &str) -> PyResult<DayOfWeek> {
    day.parse().map_err(value_err)
}

fn policy(maybe_is_free: bool) -> OccupancyPolicy {
    if maybe_is_free {
        OccupancyPolicy::NotFreeOnly
    } else {
        OccupancyPolicy::NotFreeAndMaybe
    }
}

/// Convert an `"HH:MM"` string to minutes since midnight.
///
/// Raises:
///     ValueError: If the string is not a valid `"HH:MM"` time.
#[pyfunction]
fn time_to_minutes(time: &str) -> PyResult<u32> {
    hangout_engine::to_minutes(time)
        .map(u32::from)
        .map_err(value_err)
}

/// Convert minutes since midnight to `"HH:MM"`. Values past midnight wrap.
#[pyfunction]
fn minutes_to_time(minutes: u32) -> String {
    hangout_engine::to_text(minutes)
}

/// Merge overlapping same-status ranges of one day.
///
/// Args:
///     ranges_json: JSON array of `{title, start, end, status}` objects.
///
/// Returns:
///     A JSON array of merged ranges, sorted by start time.
///
/// Raises:
///     ValueError: If a range has a malformed time or unknown status.
#[pyfunction]
fn merge_time_ranges(ranges_json: &str) -> PyResult<String> {
    let ranges: Vec<TimeRange> = serde_json::from_str(ranges_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid time ranges JSON: {}", e)))?;
    to_json(&hangout_engine::merge_ranges(&ranges))
}

/// Find ranges from different schedules that overlap, grouped by day.
///
/// Args:
///     schedules_json: JSON array of schedule documents (optionally with `ownerName`).
///
/// Returns:
///     A JSON array of `{day, conflicts}` objects; days without conflicts are left out.
#[pyfunction]
fn find_schedule_conflicts(schedules_json: &str) -> PyResult<String> {
    let refs = parse_refs(schedules_json)?;
    to_json(&hangout_engine::find_schedule_conflicts(&refs))
}

/// Free slots on `day` shared by every schedule.
///
/// Args:
///     schedules_json: JSON array of schedule documents.
///     day: Day name, e.g. "Monday" or "mon".
///     min_duration_minutes: Shortest slot to report. Default: 60.
///     maybe_is_free: Treat "Maybe Free" ranges as available. Default: False.
///
/// Returns:
///     A JSON array of `{start, end, duration_minutes}` objects.
#[pyfunction]
#[pyo3(signature = (schedules_json, day, min_duration_minutes=60, maybe_is_free=false))]
fn find_common_free_time(
    schedules_json: &str,
    day: &str,
    min_duration_minutes: u32,
    maybe_is_free: bool,
) -> PyResult<String> {
    let refs = parse_refs(schedules_json)?;
    let day = parse_day(day)?;
    let slots =
        find_common_free_time_with(&refs, day, min_duration_minutes, policy(maybe_is_free));
    to_json(&slots)
}

/// The earliest common free slot on `day`, or `"null"` if there is none.
#[pyfunction]
#[pyo3(signature = (schedules_json, day, min_duration_minutes=60, maybe_is_free=false))]
fn find_first_common_free_slot(
    schedules_json: &str,
    day: &str,
    min_duration_minutes: u32,
    maybe_is_free: bool,
) -> PyResult<String> {
    let refs = parse_refs(schedules_json)?;
    let day = parse_day(day)?;
    let first =
        find_first_common_free_slot_with(&refs, day, min_duration_minutes, policy(maybe_is_free));
    to_json(&first)
}

/// Status (`"Free"`, `"Maybe Free"` or `"Not Free"`) of one schedule at `time` on `day`.
#[pyfunction]
fn get_time_slot_status(schedule_json: &str, day: &str, time: &str) -> PyResult<String> {
    let schedule = Schedule::from_json(schedule_json).map_err(value_err)?;
    let time = TimeOfDay::parse(time).map_err(value_err)?;
    Ok(hangout_engine::status_at(&schedule, parse_day(day)?, time)
        .as_str()
        .to_string())
}

/// Group status of several schedules: `"AllFree"`, `"SomeFree"` or `"NoneFree"`.
#[pyfunction]
fn get_group_status(schedules_json: &str, day: &str, time: &str) -> PyResult<String> {
    let refs = parse_refs(schedules_json)?;
    let time = TimeOfDay::parse(time).map_err(value_err)?;
    Ok(hangout_engine::group_status_at(&refs, parse_day(day)?, time)
        .as_str()
        .to_string())
}

/// Status distribution, per-day durations and hourly activity of one schedule.
#[pyfunction]
fn get_schedule_stats(schedule_json: &str) -> PyResult<String> {
    let schedule = Schedule::from_json(schedule_json).map_err(value_err)?;
    to_json(&hangout_engine::schedule_stats(&schedule))
}

/// The native extension module, exposed as `hangout_engine._native`.
/// The public Python API is in `python/hangout_engine/__init__.py`.
#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(time_to_minutes, m)?)?;
    m.add_function(wrap_pyfunction!(minutes_to_time, m)?)?;
    m.add_function(wrap_pyfunction!(merge_time_ranges, m)?)?;
    m.add_function(wrap_pyfunction!(find_schedule_conflicts, m)?)?;
    m.add_function(wrap_pyfunction!(find_common_free_time, m)?)?;
    m.add_function(wrap_pyfunction!(find_first_common_free_slot, m)?)?;
    m.add_function(wrap_pyfunction!(get_time_slot_status, m)?)?;
    m.add_function(wrap_pyfunction!(get_group_status, m)?)?;
    m.add_function(wrap_pyfunction!(get_schedule_stats, m)?)?;
    Ok(())
}
