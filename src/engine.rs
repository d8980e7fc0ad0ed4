//! One synchronization pass, end to end.
//!
//! Load the window's events, expand them, plan the missing duties, then
//! persist each one through the duty store's conditional create. The pass
//! never mutates or deletes an existing record — user edits are sacred —
//! and one failed write doesn't abort the rest of the batch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::context::HouseholdContext;
use crate::date_window::DateWindow;
use crate::duty::DutyRecord;
use crate::error::HearthwayResult;
use crate::loader::load_relevant_events;
use crate::recurrence::expand_event;
use crate::store::{CreateOutcome, DutyStore, EventStore};
use crate::sync::{SyncFailure, plan_missing_duties};
use crate::view::{DayGroup, build_view};

/// Result of one synchronization pass over a window.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub window: DateWindow,
    /// Monotonic pass number; a caller juggling overlapping requests keeps
    /// only the outcome with the highest generation for a given view.
    pub generation: u64,
    pub created: Vec<DutyRecord>,
    /// Occurrences another pass materialized first (key collision at the
    /// store). Not failures.
    pub skipped_existing: usize,
    /// Per-record persistence failures; the caller decides whether to
    /// retry this subset.
    pub failures: Vec<SyncFailure>,
}

/// Ties the loader, expander, synchronizer and view builder together for
/// one household.
pub struct SyncEngine {
    event_store: Arc<dyn EventStore>,
    duty_store: Arc<dyn DutyStore>,
    context: HouseholdContext,
    generation: AtomicU64,
}

impl SyncEngine {
    pub fn new(
        event_store: Arc<dyn EventStore>,
        duty_store: Arc<dyn DutyStore>,
        context: HouseholdContext,
    ) -> Self {
        SyncEngine {
            event_store,
            duty_store,
            context,
            generation: AtomicU64::new(0),
        }
    }

    /// Generation of the most recently started pass.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Expand every relevant event in `window`, ordered by start.
    pub async fn occurrences_in(
        &self,
        window: &DateWindow,
    ) -> HearthwayResult<Vec<crate::occurrence::Occurrence>> {
        let events =
            load_relevant_events(self.event_store.as_ref(), &self.context.household_id, window)
                .await?;

        let mut occurrences: Vec<_> = events
            .iter()
            .flat_map(|event| expand_event(event, window))
            .collect();
        occurrences.sort_by_key(|o| o.start);
        Ok(occurrences)
    }

    /// Run one full synchronization pass for `window`.
    pub async fn synchronize_window(&self, window: &DateWindow) -> HearthwayResult<SyncOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let occurrences = self.occurrences_in(window).await?;
        let existing = self
            .duty_store
            .duties_in(&self.context.household_id, window)
            .await?;

        let planned = plan_missing_duties(&occurrences, &existing, &self.context, Utc::now());
        tracing::debug!(
            generation,
            occurrences = occurrences.len(),
            existing = existing.len(),
            planned = planned.len(),
            "synchronizing window"
        );

        let mut created = Vec::new();
        let mut skipped_existing = 0;
        let mut failures = Vec::new();

        for record in planned {
            let event_id = record.source_event_id.clone().unwrap_or_default();
            let date = record.date;
            match self.duty_store.create(record.clone()).await {
                Ok(CreateOutcome::Created(_)) => created.push(record),
                Ok(CreateOutcome::AlreadyExists) => skipped_existing += 1,
                Err(err) => {
                    tracing::warn!(%event_id, %date, error = %err, "failed to persist duty");
                    failures.push(SyncFailure {
                        event_id,
                        date,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(SyncOutcome {
            window: window.clone(),
            generation,
            created,
            skipped_existing,
            failures,
        })
    }

    /// Build the per-day view of everything currently persisted in
    /// `window`, independent of any synchronization pass's fate.
    pub async fn day_groups(
        &self,
        window: &DateWindow,
        today: chrono::NaiveDate,
    ) -> HearthwayResult<Vec<DayGroup>> {
        let duties = self
            .duty_store
            .duties_in(&self.context.household_id, window)
            .await?;
        Ok(build_view(window, &duties, today))
    }
}
