/// Error type shared by the calendar core, its appointment sources and the CLI.
///
/// Grid computation, filtering, bucketing and layout are total functions and
/// never produce these; they come from parsing user input, converting wire
/// records and talking to an appointment source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid visible window: start hour {start} must be before end hour {end} (max 24)")]
    InvalidWindow { start: u32, end: u32 },

    #[error("minimum visible height must be positive, got {0} minutes")]
    InvalidMinimumHeight(i64),

    #[error("pixels per minute must be a positive number, got {0}")]
    InvalidScale(f32),

    #[error("malformed appointment record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("invalid status: '{0}'. Must be one of: scheduled, completed, canceled, no-show")]
    UnknownStatus(String),

    #[error("invalid type: '{0}'. Must be one of: follow-up, new-patient, emergency, routine")]
    UnknownType(String),

    #[error("invalid view mode: '{0}'. Must be one of: day, week, month")]
    UnknownViewMode(String),

    #[error("invalid direction: '{0}'. Must be one of: previous, next")]
    UnknownDirection(String),

    #[error("appointment source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("failed to read appointments: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode appointments: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CalendarError {
    pub(crate) fn malformed(id: Option<&str>, reason: impl Into<String>) -> Self {
        CalendarError::MalformedRecord {
            id: id.unwrap_or("<missing id>").to_string(),
            reason: reason.into(),
        }
    }
}
