//! Window-scoped event loading.
//!
//! Pulls the minimal set of definitions that can project occurrences into
//! a window: those starting inside it, plus recurring ones that started
//! earlier but whose pattern is still live at the window's start. The two
//! queries are independent reads and run concurrently.

use std::collections::HashSet;

use crate::date_window::DateWindow;
use crate::error::HearthwayResult;
use crate::event::EventDefinition;
use crate::store::EventStore;

/// Load every event definition relevant to `window`, deduplicated by id
/// and sorted by anchor start.
pub async fn load_relevant_events(
    store: &dyn EventStore,
    household_id: &str,
    window: &DateWindow,
) -> HearthwayResult<Vec<EventDefinition>> {
    let (starting_in, spanning) = tokio::join!(
        store.events_starting_in(household_id, window),
        store.recurring_events_spanning(household_id, window.start()),
    );

    let mut seen: HashSet<String> = HashSet::new();
    let mut events: Vec<EventDefinition> = Vec::new();
    for event in starting_in?.into_iter().chain(spanning?) {
        if seen.insert(event.id.clone()) {
            events.push(event);
        }
    }

    events.sort_by_key(|e| e.start);
    tracing::debug!(
        count = events.len(),
        window_start = %window.start(),
        window_end = %window.end(),
        "loaded events for window"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Recurrence;
    use crate::store::MemoryEventStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::{BTreeMap, BTreeSet};

    fn event(id: &str, start: chrono::DateTime<Utc>, recurrence: Option<Recurrence>) -> EventDefinition {
        EventDefinition {
            id: id.to_string(),
            household_id: "hh-1".to_string(),
            title: id.to_string(),
            category: None,
            start,
            end: start + chrono::Duration::minutes(30),
            recurrence,
            participant_ids: vec![],
            requires_duty: false,
            default_assignee_by_weekday: BTreeMap::new(),
            default_assignee_id: None,
        }
    }

    fn march_window() -> DateWindow {
        DateWindow::from_dates(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_union_covers_in_window_and_spanning_events() {
        let store = MemoryEventStore::with_events(vec![
            // starts in-window, no recurrence
            event("evt-a", Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(), None),
            // started in January, still recurring into the window
            event(
                "evt-b",
                Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
                Some(Recurrence {
                    weekdays: BTreeSet::from([2]),
                    until: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                }),
            ),
            // recurrence finished before the window: irrelevant
            event(
                "evt-c",
                Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
                Some(Recurrence {
                    weekdays: BTreeSet::from([2]),
                    until: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                }),
            ),
            // non-recurring, before the window: irrelevant
            event("evt-d", Utc.with_ymd_and_hms(2024, 2, 20, 8, 0, 0).unwrap(), None),
        ]);

        let events = load_relevant_events(&store, "hh-1", &march_window())
            .await
            .unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["evt-b", "evt-a"]); // sorted by start
    }

    #[tokio::test]
    async fn test_event_matched_by_both_queries_appears_once() {
        // Starts in-window with a live recurrence reaching past it; only
        // the first query matches it (start is not before window start),
        // but a store with a looser spanning predicate must still not
        // produce duplicates.
        let recurring = event(
            "evt-both",
            Utc.with_ymd_and_hms(2024, 3, 4, 16, 0, 0).unwrap(),
            Some(Recurrence {
                weekdays: BTreeSet::from([1, 3]),
                until: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            }),
        );
        let store = MemoryEventStore::with_events(vec![recurring.clone(), recurring]);

        let events = load_relevant_events(&store, "hh-1", &march_window())
            .await
            .unwrap();
        assert_eq!(events.len(), 1);
    }
}
