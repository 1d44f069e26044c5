//! Error types for the printcal engine.

use thiserror::Error;

/// Errors that can occur while assembling a calendar.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid calendar payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for printcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
