//! # hangout-engine
//!
//! Weekly availability engine for comparing people's schedules.
//!
//! A schedule is seven days of titled, status-tagged time ranges ("Free",
//! "Maybe Free", "Not Free") at minute resolution. The engine answers the
//! questions a "when can we hang out?" view needs: which ranges collide across
//! schedules, and which stretches of a day nobody has blocked out.
//!
//! Everything here is pure and synchronous. Callers hand in schedule snapshots
//! (usually deserialized from stored JSON documents) and get derived values
//! back; nothing is mutated or persisted.
//!
//! ## Modules
//!
//! - [`time`] — `"HH:MM"` ⇄ minutes since midnight
//! - [`schedule`] — `Status`, `DayOfWeek`, `TimeRange`, `Schedule`, `ScheduleRef`
//! - [`interval`] — Containment and overlap tests, including overnight ranges
//! - [`merge`] — Coalesce overlapping same-status ranges within a day
//! - [`conflict`] — Pairwise overlaps between ranges of different schedules
//! - [`freebusy`] — Free time shared by every schedule on a day
//! - [`availability`] — Point-in-time status lookups and group status grids
//! - [`stats`] — Per-schedule status distribution and activity statistics
//! - [`error`] — Error types

pub mod availability;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod merge;
pub mod schedule;
pub mod stats;
pub mod time;

pub use availability::{group_status_at, status_at, GroupStatus};
pub use conflict::{find_conflicts_on_days, find_schedule_conflicts, Conflict, DayConflicts};
pub use error::EngineError;
pub use freebusy::{find_common_free_time, FreeSlot, OccupancyPolicy};
pub use interval::{is_within, overlaps};
pub use merge::{merge_ranges, merge_schedule};
pub use schedule::{DayOfWeek, DaySchedule, Schedule, ScheduleRef, Status, TimeRange};
pub use stats::schedule_stats;
pub use time::{to_minutes, to_text, TimeOfDay};
