//! Error types for hangout-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A time string that is not a zero-padded `HH:MM` in 00:00–23:59.
    #[error("Invalid time '{0}': expected HH:MM with hours 00-23 and minutes 00-59")]
    Format(String),

    /// A minute value outside a single day.
    #[error("Minute value {0} is outside 0..1440")]
    OutOfRange(u32),

    /// A bounded range whose start and end coincide.
    #[error("Invalid time range '{title}': start and end are both {at}")]
    InvalidRange { title: String, at: String },

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Unknown day: {0}")]
    UnknownDay(String),

    /// The schedule document itself could not be read.
    #[error("Invalid schedule document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
