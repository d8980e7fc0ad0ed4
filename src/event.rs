//! Event definitions as stored by the household calendar.
//!
//! An `EventDefinition` is either a single occurrence (`recurrence: None`)
//! or a weekly pattern. The definition is what members edit; the concrete
//! dates it implies are derived on the fly by [`crate::recurrence`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HearthwayError, HearthwayResult};

/// Weekly recurrence pattern: which weekdays the event repeats on, and the
/// last instant an occurrence may start at.
///
/// Weekdays are numbered 0 = Sunday through 6 = Saturday, matching what the
/// document store holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub weekdays: BTreeSet<u8>,
    pub until: DateTime<Utc>,
}

impl Recurrence {
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(&weekday_index(date))
    }
}

/// A calendar event as stored, before any expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub category: Option<String>,

    /// Anchor occurrence. For recurring events this fixes the time-of-day
    /// and duration of every occurrence.
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    pub recurrence: Option<Recurrence>,

    /// People involved in the event itself (riders, attendees).
    pub participant_ids: Vec<String>,

    /// Whether each occurrence needs a duty record (e.g. someone has to
    /// drive). Drives the synchronizer.
    pub requires_duty: bool,
    /// Preferred assignee per weekday (0 = Sunday), consulted first.
    pub default_assignee_by_weekday: BTreeMap<u8, String>,
    /// Fallback assignee when no weekday-specific default applies.
    pub default_assignee_id: Option<String>,
}

impl EventDefinition {
    /// Validate the temporal invariants at the edit boundary.
    ///
    /// The read paths tolerate violated invariants (they expand to
    /// nothing); this is the check that keeps bad data out in the first
    /// place.
    pub fn validate(&self) -> HearthwayResult<()> {
        if self.end <= self.start {
            return Err(HearthwayError::InvalidEvent {
                id: self.id.clone(),
                reason: format!("end {} is not after start {}", self.end, self.start),
            });
        }
        if let Some(recurrence) = &self.recurrence {
            if recurrence.until < self.start {
                return Err(HearthwayError::InvalidEvent {
                    id: self.id.clone(),
                    reason: format!(
                        "recurrence ends {} before the event starts {}",
                        recurrence.until, self.start
                    ),
                });
            }
            if recurrence.weekdays.iter().any(|d| *d > 6) {
                return Err(HearthwayError::InvalidEvent {
                    id: self.id.clone(),
                    reason: "recurrence weekday outside 0..=6".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Elapsed duration of one occurrence.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Resolve the default duty assignee for an occurrence on `date`:
    /// weekday-specific default first, then the flat default, then nobody.
    pub fn default_assignee_for(&self, date: NaiveDate) -> Option<String> {
        self.default_assignee_by_weekday
            .get(&weekday_index(date))
            .cloned()
            .or_else(|| self.default_assignee_id.clone())
    }
}

/// Weekday number of a date, 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
