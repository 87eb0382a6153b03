//! Containment and overlap tests for time ranges within one day.
//!
//! Ranges are half-open, `[start, end)`, so a range ending at 10:00 and one
//! starting at 10:00 do not overlap. A range whose end is before its start is
//! overnight and covers `[start, 24:00)` plus `[00:00, end)`.
//!
//! Two overnight ranges on the same day are always reported as overlapping.
//! Both cover midnight in the same day frame, so they share at least the
//! instant the day wraps; the exact shared window is not computed.

use crate::schedule::TimeRange;
use crate::time::TimeOfDay;

/// True if `time` falls inside `range`.
///
/// Forward ranges contain `start <= time < end`. Overnight ranges contain
/// `time >= start` or `time < end`.
pub fn is_within(time: TimeOfDay, range: &TimeRange) -> bool {
    if range.is_overnight() {
        time >= range.start || time < range.end
    } else {
        time >= range.start && time < range.end
    }
}

/// True if two ranges share any time.
///
/// - Neither overnight: `a.start < b.end && a.end > b.start`.
/// - One overnight: the other range's start or end lies within the overnight one.
/// - Both overnight: always true.
///
/// Symmetric in its arguments.
pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    match (a.is_overnight(), b.is_overnight()) {
        (true, true) => true,
        (true, false) => is_within(b.start, a) || is_within(b.end, a),
        (false, true) => is_within(a.start, b) || is_within(a.end, b),
        (false, false) => a.start < b.end && a.end > b.start,
    }
}
