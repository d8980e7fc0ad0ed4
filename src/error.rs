//! Error types for the Hearthway scheduling core.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in scheduling-core operations.
#[derive(Error, Debug)]
pub enum HearthwayError {
    #[error("Invalid date window: {0}")]
    InvalidWindow(String),

    #[error("Invalid event definition '{id}': {reason}")]
    InvalidEvent { id: String, reason: String },

    #[error("Store error: {0}")]
    Store(String),

    #[error("Duty already materialized for event '{event_id}' on {date}")]
    DuplicateDuty { event_id: String, date: NaiveDate },
}

/// Result type alias for scheduling-core operations.
pub type HearthwayResult<T> = Result<T, HearthwayError>;
