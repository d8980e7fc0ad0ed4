//! Recurrence expansion for event definitions.
//!
//! Expands a stored event into the concrete occurrences it projects into a
//! date window. Pure and deterministic: no I/O, no clock reads, same inputs
//! always give the same sequence.

use chrono::{Duration, NaiveDate};

use crate::date_window::DateWindow;
use crate::event::{EventDefinition, Recurrence, weekday_index};
use crate::occurrence::Occurrence;

/// Expand an event definition into the ordered occurrences it implies
/// within `window` (ascending by start).
///
/// Non-recurring events yield at most one occurrence: the anchor itself, if
/// its start falls inside the closed window. Recurring events are walked
/// day by day across the overlap of the window and the recurrence span.
///
/// Violated temporal invariants (legacy bad data) expand to an empty
/// sequence rather than failing the read path; the edit boundary is where
/// they get rejected.
pub fn expand_event(event: &EventDefinition, window: &DateWindow) -> Vec<Occurrence> {
    if event.end <= event.start {
        tracing::warn!(event_id = %event.id, "event has non-positive duration, skipping expansion");
        return Vec::new();
    }

    match &event.recurrence {
        None => expand_single(event, window),
        Some(recurrence) => expand_recurring(event, recurrence, window),
    }
}

fn expand_single(event: &EventDefinition, window: &DateWindow) -> Vec<Occurrence> {
    if !window.contains(event.start) {
        return Vec::new();
    }
    vec![Occurrence {
        source: event.clone(),
        date: event.start.date_naive(),
        start: event.start,
        end: event.end,
    }]
}

fn expand_recurring(
    event: &EventDefinition,
    recurrence: &Recurrence,
    window: &DateWindow,
) -> Vec<Occurrence> {
    if recurrence.until < event.start {
        tracing::warn!(event_id = %event.id, "recurrence ends before event starts, skipping expansion");
        return Vec::new();
    }

    let duration = event.duration();
    let time_of_day = event.start.time();

    // Walk from the later of (window start, event start), rewound to the
    // Sunday starting that week so a mid-week anchor can't skip the rest of
    // its own week. The per-occurrence filters below discard anything the
    // rewind drags in from before the event or the window.
    let anchor = window.start().max(event.start).date_naive();
    let mut cursor = start_of_week(anchor);
    let last_date = window.end().min(recurrence.until).date_naive();

    let mut occurrences = Vec::new();
    while cursor <= last_date {
        if recurrence.matches_date(cursor) {
            let start = cursor.and_time(time_of_day).and_utc();
            let in_window = start >= window.start() && start <= window.end();
            if in_window && start >= event.start && start <= recurrence.until {
                occurrences.push(Occurrence {
                    source: event.clone(),
                    date: cursor,
                    start,
                    end: start + duration,
                });
            }
        }
        cursor += Duration::days(1);
    }

    occurrences
}

/// The Sunday on or before `date`.
fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_index(date)))
}
