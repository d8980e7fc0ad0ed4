//! Concrete occurrences derived from event definitions.

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::EventDefinition;

/// One concrete date/time instance implied by an event definition.
///
/// Occurrences are never persisted; they exist only as the intermediate
/// product between expansion and duty materialization or display. Identity
/// is derived: `(source.id, date)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// The definition this occurrence was projected from, as of expansion
    /// time.
    pub source: EventDefinition,
    /// Calendar date of the occurrence (its date key).
    pub date: NaiveDate,
    /// Same time-of-day as the source's anchor start, on `date`.
    pub start: DateTime<Utc>,
    /// `start` plus the source's elapsed duration.
    pub end: DateTime<Utc>,
}

impl Occurrence {
    /// Materialization key of the duty this occurrence would produce.
    pub fn duty_key(&self) -> (String, NaiveDate) {
        (self.source.id.clone(), self.date)
    }
}
