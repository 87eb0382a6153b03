//! WASM bindings for hangout-engine.
//!
//! Exposes time conversion, range merging, schedule conflicts, common free time
//! and status lookups to JavaScript via `wasm-bindgen`. Schedules and ranges
//! cross the boundary as JSON strings in the same document shape the engine
//! reads everywhere else.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p hangout-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/hangout_engine_wasm.wasm
//! ```

use hangout_engine::freebusy::find_common_free_time_with;
use hangout_engine::{DayOfWeek, OccupancyPolicy, Schedule, ScheduleRef, TimeOfDay, TimeRange};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers for crossing the boundary as JSON
// ---------------------------------------------------------------------------

fn engine_err(e: hangout_engine::EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_ranges(json: &str) -> Result<Vec<TimeRange>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid time ranges JSON: {}", e)))
}

fn parse_range(json: &str) -> Result<TimeRange, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid time range JSON: {}", e)))
}

/// A JSON array of schedule documents, each with an optional `ownerName`.
fn parse_refs(json: &str) -> Result<Vec<ScheduleRef>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedules JSON: {}", e)))
}

fn parse_schedule(json: &str) -> Result<Schedule, JsValue> {
    Schedule::from_json(json).map_err(engine_err)
}

fn parse_day(day: &str) -> Result<DayOfWeek, JsValue> {
    day.parse().map_err(engine_err)
}

fn parse_time(time: &str) -> Result<TimeOfDay, JsValue> {
    TimeOfDay::parse(time).map_err(engine_err)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Convert `"HH:MM"` to minutes since midnight.
#[wasm_bindgen(js_name = "timeToMinutes")]
pub fn time_to_minutes(time: &str) -> Result<u32, JsValue> {
    hangout_engine::to_minutes(time)
        .map(u32::from)
        .map_err(engine_err)
}

/// Convert minutes since midnight to `"HH:MM"`, wrapping past midnight.
#[wasm_bindgen(js_name = "minutesToTime")]
pub fn minutes_to_time(minutes: u32) -> String {
    hangout_engine::to_text(minutes)
}

/// Whether `time` falls inside the range, honouring overnight ranges.
#[wasm_bindgen(js_name = "isTimeInRange")]
pub fn is_time_in_range(time: &str, range_json: &str) -> Result<bool, JsValue> {
    Ok(hangout_engine::is_within(parse_time(time)?, &parse_range(range_json)?))
}

/// Whether two ranges overlap.
#[wasm_bindgen(js_name = "doRangesOverlap")]
pub fn do_ranges_overlap(a_json: &str, b_json: &str) -> Result<bool, JsValue> {
    Ok(hangout_engine::overlaps(&parse_range(a_json)?, &parse_range(b_json)?))
}

/// Merge overlapping same-status ranges of one day.
///
/// Takes and returns a JSON array of `{title, start, end, status}` objects.
#[wasm_bindgen(js_name = "mergeTimeRanges")]
pub fn merge_time_ranges(ranges_json: &str) -> Result<String, JsValue> {
    let ranges = parse_ranges(ranges_json)?;
    to_json(&hangout_engine::merge_ranges(&ranges))
}

/// Find overlapping ranges between schedules, grouped by day.
///
/// `schedules_json` is a JSON array of schedule documents. Returns a JSON array
/// of `{day, conflicts}` objects, leaving out days without conflicts.
#[wasm_bindgen(js_name = "findScheduleConflicts")]
pub fn find_schedule_conflicts(schedules_json: &str) -> Result<String, JsValue> {
    let refs = parse_refs(schedules_json)?;
    to_json(&hangout_engine::find_schedule_conflicts(&refs))
}

/// Free slots on `day` that every schedule shares, at least
/// `min_duration_minutes` long.
///
/// "Maybe Free" ranges block time unless `maybe_is_free` is true. Returns a
/// JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findCommonFreeTime")]
pub fn find_common_free_time(
    schedules_json: &str,
    day: &str,
    min_duration_minutes: u32,
    maybe_is_free: Option<bool>,
) -> Result<String, JsValue> {
    let refs = parse_refs(schedules_json)?;
    let policy = if maybe_is_free.unwrap_or(false) {
        OccupancyPolicy::NotFreeOnly
    } else {
        OccupancyPolicy::NotFreeAndMaybe
    };
    let slots = find_common_free_time_with(&refs, parse_day(day)?, min_duration_minutes, policy);
    to_json(&slots)
}

/// Status string (`"Free"`, `"Maybe Free"`, `"Not Free"`) of one schedule at
/// `time` on `day`.
#[wasm_bindgen(js_name = "getTimeSlotStatus")]
pub fn get_time_slot_status(schedule_json: &str, day: &str, time: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let status = hangout_engine::status_at(&schedule, parse_day(day)?, parse_time(time)?);
    Ok(status.as_str().to_string())
}

/// Group status of several schedules at one instant: `"AllFree"`,
/// `"SomeFree"` or `"NoneFree"`.
#[wasm_bindgen(js_name = "getGroupStatus")]
pub fn get_group_status(schedules_json: &str, day: &str, time: &str) -> Result<String, JsValue> {
    let refs = parse_refs(schedules_json)?;
    let status = hangout_engine::group_status_at(&refs, parse_day(day)?, parse_time(time)?);
    Ok(status.as_str().to_string())
}

/// Status distribution and activity statistics for one schedule, as JSON.
#[wasm_bindgen(js_name = "getScheduleStats")]
pub fn get_schedule_stats(schedule_json: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    to_json(&hangout_engine::schedule_stats(&schedule))
}

/// Slot start times from `start_hour` up to `end_hour`, every
/// `interval_minutes`, as a JSON array of `"HH:MM"` strings.
#[wasm_bindgen(js_name = "generateTimeSlots")]
pub fn generate_time_slots(
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
) -> Result<String, JsValue> {
    to_json(&hangout_engine::time::generate_time_slots(start_hour, end_hour, interval_minutes))
}

/// Reject a range whose start equals its end.
#[wasm_bindgen(js_name = "validateTimeRange")]
pub fn validate_time_range(range_json: &str) -> Result<(), JsValue> {
    parse_range(range_json)?.validate().map_err(engine_err)
}
