//! Week/day view assembly.
//!
//! Groups persisted duties by calendar date for display. Pure and
//! read-only: it renders whatever is stored, whether or not the latest
//! synchronization pass succeeded.

use chrono::{Duration, NaiveDate};

use crate::date_window::DateWindow;
use crate::duty::DutyRecord;

/// All duties of one calendar date, with display label and counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub label: String,
    pub duties: Vec<DutyRecord>,
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
}

/// Group `duties` by date across every day of `window`, in order. Days
/// without duties still get a (empty) group; a week view renders all of
/// its columns. `today` drives the relative labels and is passed in so the
/// result stays deterministic.
pub fn build_view(window: &DateWindow, duties: &[DutyRecord], today: NaiveDate) -> Vec<DayGroup> {
    window
        .days()
        .map(|date| {
            let mut day_duties: Vec<DutyRecord> = duties
                .iter()
                .filter(|d| d.date == date)
                .cloned()
                .collect();
            day_duties.sort_by_key(|d| d.starts_at);

            let total = day_duties.len();
            let assigned = day_duties.iter().filter(|d| d.assignee_id.is_some()).count();

            DayGroup {
                date,
                label: day_label(date, today),
                duties: day_duties,
                total,
                assigned,
                unassigned: total - assigned,
            }
        })
        .collect()
}

/// Relative label for today/tomorrow, absolute weekday-and-date otherwise.
fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        date.format("%A, %-d %B").to_string()
    }
}
