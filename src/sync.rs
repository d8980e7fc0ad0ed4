//! Duty synchronization planning.
//!
//! The pure half of a synchronization pass: diff expanded occurrences
//! against already-materialized duties and build exactly the records that
//! are missing. Persisting them (and racing other passes at the store) is
//! the engine's job.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::context::HouseholdContext;
use crate::duty::DutyRecord;
use crate::occurrence::Occurrence;

/// A single duty that could not be persisted during a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    pub event_id: String,
    pub date: NaiveDate,
    pub message: String,
}

/// Build the duty records missing for `occurrences` given what is already
/// persisted.
///
/// Occurrences whose source doesn't require a duty are skipped, as are
/// those whose materialization key is already present in `existing`.
/// Standalone duties (no source event) never block a key. Running the plan
/// again over its own persisted output yields nothing.
pub fn plan_missing_duties(
    occurrences: &[Occurrence],
    existing: &[DutyRecord],
    context: &HouseholdContext,
    now: DateTime<Utc>,
) -> Vec<DutyRecord> {
    let materialized: HashSet<(String, NaiveDate)> = existing
        .iter()
        .filter_map(DutyRecord::materialization_key)
        .collect();

    let mut planned_keys: HashSet<(String, NaiveDate)> = HashSet::new();
    let mut planned = Vec::new();

    for occurrence in occurrences {
        if !occurrence.source.requires_duty {
            continue;
        }
        let key = occurrence.duty_key();
        if materialized.contains(&key) || !planned_keys.insert(key) {
            continue;
        }
        planned.push(DutyRecord::from_occurrence(occurrence, context, now));
    }

    planned
}
