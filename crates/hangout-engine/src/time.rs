//! Conversion between `"HH:MM"` strings and minutes since midnight.
//!
//! All engine arithmetic happens on minute values in `0..1440`. Text only
//! appears at the edges: schedule documents carry zero-padded 24-hour
//! `"HH:MM"` strings, and every derived value is rendered back the same way.
//!
//! Parsing is strict. `"9:00"`, `"09:5"`, `"24:30"` and `"ab:cd"` are all
//! rejected with [`EngineError::Format`] instead of being coerced to midnight.
//! The single exception is `"24:00"`, which [`TimeOfDay::parse_end`] accepts as
//! the upper bound of a range that runs to the end of the day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, Result};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A wall-clock time at minute resolution.
///
/// Values are always in `0..1440`, except [`TimeOfDay::END_OF_DAY`] which only
/// ever appears as the `end` of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// `24:00`, the exclusive end of a range that runs to midnight.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Parse a strict `"HH:MM"` string (00:00–23:59).
    pub fn parse(text: &str) -> Result<Self> {
        to_minutes(text).map(TimeOfDay)
    }

    /// Parse the end bound of a range. Same as [`TimeOfDay::parse`] but also
    /// accepts `"24:00"`.
    pub fn parse_end(text: &str) -> Result<Self> {
        if text == "24:00" {
            Ok(Self::END_OF_DAY)
        } else {
            Self::parse(text)
        }
    }

    /// Build from a minute value, rejecting anything outside `0..1440`.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes < u32::from(MINUTES_PER_DAY) {
            Ok(TimeOfDay(minutes as u16))
        } else {
            Err(EngineError::OutOfRange(minutes))
        }
    }

    /// Build from an hour (0–23) and minute (0–59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour < 24 && minute < 60 {
            Ok(TimeOfDay((hour * 60 + minute) as u16))
        } else {
            Err(EngineError::Format(format!("{:02}:{:02}", hour, minute)))
        }
    }

    /// Build from an accumulated minute value, wrapping past midnight.
    pub fn wrapping(minutes: u32) -> Self {
        TimeOfDay((minutes % u32::from(MINUTES_PER_DAY)) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_day() {
            f.write_str("24:00")
        } else {
            write!(f, "{:02}:{:02}", self.hour(), self.minute())
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse `"HH:MM"` into minutes since midnight.
///
/// Exactly two digits, a colon, two digits; hours 00–23, minutes 00–59.
///
/// # Errors
/// Returns `EngineError::Format` for anything else.
pub fn to_minutes(text: &str) -> Result<u16> {
    let malformed = || EngineError::Format(text.to_string());

    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(malformed());
    }
    let digit = |i: usize| -> Result<u16> {
        let b = bytes[i];
        if b.is_ascii_digit() {
            Ok(u16::from(b - b'0'))
        } else {
            Err(malformed())
        }
    };

    let hours = digit(0)? * 10 + digit(1)?;
    let minutes = digit(3)? * 10 + digit(4)?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }

    Ok(hours * 60 + minutes)
}

/// Render minutes since midnight as `"HH:MM"`.
///
/// Values of 1440 or more (from accumulating durations) wrap modulo one day,
/// so the output is always a valid time and never `"24:00"`.
pub fn to_text(minutes: u32) -> String {
    TimeOfDay::wrapping(minutes).to_string()
}

/// Slot start times from `start_hour` up to (not including) `end_hour`, every
/// `interval_minutes`.
///
/// `end_hour` may be 24. An interval of zero yields no slots.
pub fn generate_time_slots(
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
) -> Vec<TimeOfDay> {
    if interval_minutes == 0 {
        return Vec::new();
    }
    let start = start_hour.saturating_mul(60);
    let end = end_hour.saturating_mul(60).min(u32::from(MINUTES_PER_DAY));

    (start..end)
        .step_by(interval_minutes as usize)
        .map(|m| TimeOfDay(m as u16))
        .collect()
}
