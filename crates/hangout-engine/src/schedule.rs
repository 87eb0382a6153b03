//! Schedule data model and the JSON document boundary.
//!
//! Stored schedules look like this:
//!
//! ```json
//! {
//!   "id": "64f1c0ffee",
//!   "name": "Work week",
//!   "schedule": {
//!     "Monday": { "timeRanges": [
//!       { "title": "Standup", "start": "09:00", "end": "09:15", "status": "Not Free" }
//!     ] }
//!   }
//! }
//! ```
//!
//! Documents are validated here, once: times must be strict `"HH:MM"` (range
//! ends may also be `"24:00"`), statuses must be one of the three exact wire
//! strings, and day names must be full English weekday names. Missing days
//! become empty days, so a [`Schedule`] always has all seven.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Availability status of a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Free")]
    Free,
    #[serde(rename = "Maybe Free")]
    MaybeFree,
    #[serde(rename = "Not Free")]
    NotFree,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Free, Status::MaybeFree, Status::NotFree];

    /// The exact wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Free => "Free",
            Status::MaybeFree => "Maybe Free",
            Status::NotFree => "Not Free",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = EngineError;

    /// Only the exact wire strings are accepted; callers normalize case first.
    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| EngineError::UnknownStatus(s.to_string()))
    }
}

/// A day of the week, in Sunday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Position in the week, Sunday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    /// Accepts full names and three-letter abbreviations, case-insensitively
    /// (`"Monday"`, `"monday"`, `"Mon"`). Documents use the exact serde names.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| EngineError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        DayOfWeek::ALL[weekday.num_days_from_sunday() as usize]
    }
}

/// A titled, status-tagged span of one day.
///
/// Spans `[start, end)`. When `end < start` the range is overnight and wraps
/// past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    pub title: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub status: Status,
    /// Client-side identifier carried by stored documents; never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Deserialize)]
struct RawTimeRange {
    #[serde(default)]
    title: String,
    start: String,
    end: String,
    status: Status,
    #[serde(default)]
    id: Option<i64>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = EngineError;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        Ok(TimeRange {
            title: raw.title,
            start: TimeOfDay::parse(&raw.start)?,
            end: TimeOfDay::parse_end(&raw.end)?,
            status: raw.status,
            id: raw.id,
        })
    }
}

impl TimeRange {
    /// Build a range from `"HH:MM"` bounds. `end` may be `"24:00"`.
    ///
    /// # Errors
    /// Returns `EngineError::Format` if either bound is malformed.
    pub fn new(title: impl Into<String>, start: &str, end: &str, status: Status) -> Result<Self> {
        Ok(TimeRange {
            title: title.into(),
            start: TimeOfDay::parse(start)?,
            end: TimeOfDay::parse_end(end)?,
            status,
            id: None,
        })
    }

    /// True when the range wraps past midnight.
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Covered minutes, counting the wrapped part of overnight ranges.
    pub fn duration_minutes(&self) -> u32 {
        let start = u32::from(self.start.minutes());
        let end = u32::from(self.end.minutes());
        if self.is_overnight() {
            u32::from(MINUTES_PER_DAY) - start + end
        } else {
            end - start
        }
    }

    /// Reject a degenerate range whose start equals its end.
    ///
    /// Only callers that want the check call this; the interval, merge and
    /// free-time operations accept degenerate ranges as they are.
    pub fn validate(&self) -> Result<()> {
        if self.start == self.end {
            return Err(EngineError::InvalidRange {
                title: self.title.clone(),
                at: self.start.to_string(),
            });
        }
        Ok(())
    }
}

/// The ranges of one day, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(rename = "timeRanges", default)]
    pub time_ranges: Vec<TimeRange>,
}

/// A named weekly schedule with all seven days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScheduleDocument", into = "ScheduleDocument")]
pub struct Schedule {
    pub id: String,
    pub name: String,
    days: [DaySchedule; 7],
}

/// Stored documents carry Mongo's `_id`; clients often add an `id` copy next
/// to it. `_id` wins when both are present.
#[derive(Serialize, Deserialize)]
struct ScheduleDocument {
    #[serde(rename = "_id", default, skip_serializing)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    schedule: BTreeMap<DayOfWeek, Option<DaySchedule>>,
}

fn document_id(mongo_id: Option<String>, id: Option<String>) -> String {
    mongo_id
        .filter(|id| !id.is_empty())
        .or(id)
        .unwrap_or_default()
}

impl From<ScheduleDocument> for Schedule {
    fn from(doc: ScheduleDocument) -> Self {
        let mut schedule = Schedule::new(document_id(doc.mongo_id, doc.id), doc.name);
        for (day, ranges) in doc.schedule {
            if let Some(ranges) = ranges {
                schedule.days[day.index()] = ranges;
            }
        }
        schedule
    }
}

impl From<Schedule> for ScheduleDocument {
    fn from(schedule: Schedule) -> Self {
        let Schedule { id, name, days } = schedule;
        ScheduleDocument {
            mongo_id: None,
            id: Some(id),
            name,
            schedule: DayOfWeek::ALL
                .into_iter()
                .zip(days.into_iter().map(Some))
                .collect(),
        }
    }
}

impl Schedule {
    /// An empty schedule.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Schedule {
            id: id.into(),
            name: name.into(),
            days: Default::default(),
        }
    }

    /// Parse a stored schedule document.
    ///
    /// # Errors
    /// Returns `EngineError::Document` for malformed JSON, bad times, unknown
    /// statuses or unknown day names.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn day(&self, day: DayOfWeek) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut DaySchedule {
        &mut self.days[day.index()]
    }

    /// The ranges of `day`; empty when the day has none.
    pub fn ranges(&self, day: DayOfWeek) -> &[TimeRange] {
        &self.days[day.index()].time_ranges
    }

    /// All seven days in week order.
    pub fn days(&self) -> impl Iterator<Item = (DayOfWeek, &DaySchedule)> {
        DayOfWeek::ALL.into_iter().zip(self.days.iter())
    }

    pub fn add_range(&mut self, day: DayOfWeek, range: TimeRange) {
        self.day_mut(day).time_ranges.push(range);
    }

    /// Add a copy of `range` to each of `days`, e.g. a recurring class or a
    /// nightly sleep block.
    pub fn add_to_days(&mut self, range: &TimeRange, days: &[DayOfWeek]) {
        for &day in days {
            self.add_range(day, range.clone());
        }
    }

    /// Remove every range titled `title` from `days`. Returns how many were
    /// removed.
    pub fn remove_titled(&mut self, title: &str, days: &[DayOfWeek]) -> usize {
        let mut removed = 0;
        for &day in days {
            let ranges = &mut self.day_mut(day).time_ranges;
            let before = ranges.len();
            ranges.retain(|r| r.title != title);
            removed += before - ranges.len();
        }
        removed
    }

    /// Run [`TimeRange::validate`] on every range.
    pub fn validate(&self) -> Result<()> {
        self.days
            .iter()
            .flat_map(|day| day.time_ranges.iter())
            .try_for_each(TimeRange::validate)
    }
}

/// A schedule paired with the labels a comparison view shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ScheduleRefDocument")]
pub struct ScheduleRef {
    pub schedule_id: String,
    pub display_name: String,
    pub owner_label: String,
    pub schedule: Schedule,
}

/// A schedule document with an optional `ownerName` next to its fields.
#[derive(Deserialize)]
struct ScheduleRefDocument {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    schedule: BTreeMap<DayOfWeek, Option<DaySchedule>>,
    #[serde(rename = "ownerName", default)]
    owner_name: Option<String>,
}

impl From<ScheduleRefDocument> for ScheduleRef {
    fn from(doc: ScheduleRefDocument) -> Self {
        let schedule = Schedule::from(ScheduleDocument {
            mongo_id: doc.mongo_id,
            id: doc.id,
            name: doc.name,
            schedule: doc.schedule,
        });
        ScheduleRef::new(schedule, doc.owner_name.unwrap_or_default())
    }
}

impl ScheduleRef {
    /// Reference `schedule` under its own id and name.
    pub fn new(schedule: Schedule, owner_label: impl Into<String>) -> Self {
        ScheduleRef {
            schedule_id: schedule.id.clone(),
            display_name: schedule.name.clone(),
            owner_label: owner_label.into(),
            schedule,
        }
    }

    /// Parse a schedule document, reading `ownerName` as the owner label.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn ranges(&self, day: DayOfWeek) -> &[TimeRange] {
        self.schedule.ranges(day)
    }
}
