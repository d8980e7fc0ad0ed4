//! Duty records: the persisted, user-editable side of an occurrence.
//!
//! A duty freezes a snapshot of its source event at materialization time.
//! Later edits to the event definition do not rewrite a duty someone has
//! already been assigned to; that is deliberate, not a denormalization
//! accident.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::HouseholdContext;
use crate::occurrence::Occurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// One occurrence's real-world responsibility assignment (e.g. who drives).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyRecord {
    pub id: String,
    pub household_id: String,

    /// Source event this duty was materialized from. `None` marks a
    /// standalone duty a member created by hand.
    pub source_event_id: Option<String>,
    /// Date key; together with `source_event_id` this is the
    /// materialization key.
    pub date: NaiveDate,

    // Snapshot of the source event at materialization time
    pub title: String,
    pub category: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub participant_ids: Vec<String>,

    pub assignee_id: Option<String>,
    pub status: DutyStatus,
    pub assigned_by: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl DutyRecord {
    /// Materialize a pending duty from an occurrence. Resolves the default
    /// assignee from the source event's weekday map, then its flat default.
    pub fn from_occurrence(
        occurrence: &Occurrence,
        context: &HouseholdContext,
        now: DateTime<Utc>,
    ) -> Self {
        let source = &occurrence.source;
        let assignee_id = source.default_assignee_for(occurrence.date);

        DutyRecord {
            id: Uuid::new_v4().to_string(),
            household_id: context.household_id.clone(),
            source_event_id: Some(source.id.clone()),
            date: occurrence.date,
            title: source.title.clone(),
            category: source.category.clone(),
            starts_at: occurrence.start,
            ends_at: occurrence.end,
            participant_ids: source.participant_ids.clone(),
            // A default assignment is the system's suggestion, not a user
            // action, so the audit fields stay empty until someone assigns.
            assignee_id,
            status: DutyStatus::Pending,
            assigned_by: None,
            assigned_at: None,
            notes: None,
            created_at: now,
        }
    }

    /// Materialization key, present only for event-derived duties.
    pub fn materialization_key(&self) -> Option<(String, NaiveDate)> {
        self.source_event_id
            .as_ref()
            .map(|event_id| (event_id.clone(), self.date))
    }
}
