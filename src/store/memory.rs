//! In-memory store implementations.
//!
//! Used as fixtures by this crate's tests and as a backend for embedded or
//! offline callers. The duty store enforces the materialization-key
//! uniqueness constraint under a single lock, which makes its `create` the
//! conditional primitive the engine relies on.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::date_window::DateWindow;
use crate::duty::DutyRecord;
use crate::error::{HearthwayError, HearthwayResult};
use crate::event::EventDefinition;
use crate::store::{CreateOutcome, DutyStore, EventStore};

#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<EventDefinition>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<EventDefinition>) -> Self {
        MemoryEventStore {
            events: Mutex::new(events),
        }
    }

    pub fn insert(&self, event: EventDefinition) -> HearthwayResult<()> {
        event.validate()?;
        self.lock()?.push(event);
        Ok(())
    }

    fn lock(&self) -> HearthwayResult<std::sync::MutexGuard<'_, Vec<EventDefinition>>> {
        self.events
            .lock()
            .map_err(|_| HearthwayError::Store("event store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn events_starting_in(
        &self,
        household_id: &str,
        window: &DateWindow,
    ) -> HearthwayResult<Vec<EventDefinition>> {
        let events = self.lock()?;
        Ok(events
            .iter()
            .filter(|e| e.household_id == household_id && window.contains(e.start))
            .cloned()
            .collect())
    }

    async fn recurring_events_spanning(
        &self,
        household_id: &str,
        window_start: DateTime<Utc>,
    ) -> HearthwayResult<Vec<EventDefinition>> {
        let events = self.lock()?;
        Ok(events
            .iter()
            .filter(|e| {
                e.household_id == household_id
                    && e.start < window_start
                    && e.recurrence
                        .as_ref()
                        .is_some_and(|r| r.until >= window_start)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct DutyState {
    duties: Vec<DutyRecord>,
    keys: HashSet<(String, NaiveDate)>,
}

#[derive(Default)]
pub struct MemoryDutyStore {
    state: Mutex<DutyState>,
}

impl MemoryDutyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored, for assertions and direct reads.
    pub fn all(&self) -> HearthwayResult<Vec<DutyRecord>> {
        Ok(self.lock()?.duties.clone())
    }

    fn lock(&self) -> HearthwayResult<std::sync::MutexGuard<'_, DutyState>> {
        self.state
            .lock()
            .map_err(|_| HearthwayError::Store("duty store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DutyStore for MemoryDutyStore {
    async fn duties_in(
        &self,
        household_id: &str,
        window: &DateWindow,
    ) -> HearthwayResult<Vec<DutyRecord>> {
        let state = self.lock()?;
        let first = window.start().date_naive();
        let last = window.end().date_naive();
        Ok(state
            .duties
            .iter()
            .filter(|d| d.household_id == household_id && d.date >= first && d.date <= last)
            .cloned()
            .collect())
    }

    async fn create(&self, record: DutyRecord) -> HearthwayResult<CreateOutcome> {
        let mut state = self.lock()?;
        if let Some(key) = record.materialization_key() {
            if state.keys.contains(&key) {
                return Ok(CreateOutcome::AlreadyExists);
            }
            state.keys.insert(key);
        }
        let id = record.id.clone();
        state.duties.push(record);
        Ok(CreateOutcome::Created(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::HouseholdContext;
    use crate::occurrence::Occurrence;
    use chrono::TimeZone;
    use std::collections::{BTreeMap, BTreeSet};

    fn event(id: &str, start: DateTime<Utc>, until: Option<DateTime<Utc>>) -> EventDefinition {
        EventDefinition {
            id: id.to_string(),
            household_id: "hh-1".to_string(),
            title: "Swim class".to_string(),
            category: None,
            start,
            end: start + chrono::Duration::hours(1),
            recurrence: until.map(|until| crate::event::Recurrence {
                weekdays: BTreeSet::from([2]),
                until,
            }),
            participant_ids: vec![],
            requires_duty: true,
            default_assignee_by_weekday: BTreeMap::new(),
            default_assignee_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_create_is_a_no_op() {
        let store = MemoryDutyStore::new();
        let context = HouseholdContext::new("hh-1", "person-1");
        let source = event("evt-1", Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(), None);
        let occurrence = Occurrence {
            source: source.clone(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            start: source.start,
            end: source.end,
        };

        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let first = DutyRecord::from_occurrence(&occurrence, &context, now);
        let second = DutyRecord::from_occurrence(&occurrence, &context, now);

        assert!(matches!(
            store.create(first).await.unwrap(),
            CreateOutcome::Created(_)
        ));
        assert_eq!(
            store.create(second).await.unwrap(),
            CreateOutcome::AlreadyExists
        );
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_standalone_duties_bypass_the_key_constraint() {
        let store = MemoryDutyStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();

        for i in 0..2 {
            let record = DutyRecord {
                id: format!("duty-{i}"),
                household_id: "hh-1".to_string(),
                source_event_id: None,
                date,
                title: "Pick up groceries".to_string(),
                category: None,
                starts_at: start,
                ends_at: start,
                participant_ids: vec![],
                assignee_id: None,
                status: crate::duty::DutyStatus::Pending,
                assigned_by: None,
                assigned_at: None,
                notes: None,
                created_at: start,
            };
            assert!(matches!(
                store.create(record).await.unwrap(),
                CreateOutcome::Created(_)
            ));
        }
        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_event_queries_filter_by_household_and_window() {
        let in_window = event("evt-in", Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(), None);
        let mut other_household = in_window.clone();
        other_household.id = "evt-other".to_string();
        other_household.household_id = "hh-2".to_string();

        let store = MemoryEventStore::with_events(vec![in_window, other_household]);
        let window = DateWindow::from_dates(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
        .unwrap();

        let found = store.events_starting_in("hh-1", &window).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "evt-in");
    }

    #[tokio::test]
    async fn test_spanning_query_requires_live_recurrence() {
        let window_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let old_start = Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap();

        let live = event("evt-live", old_start, Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        let finished = event("evt-done", old_start, Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
        let single = event("evt-single", old_start, None);

        let store = MemoryEventStore::with_events(vec![live, finished, single]);
        let found = store
            .recurring_events_spanning("hh-1", window_start)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "evt-live");
    }
}
