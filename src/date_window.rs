//! Date window for loading, expanding and viewing events.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WINDOW_DAYS;
use crate::error::{HearthwayError, HearthwayResult};

/// A closed `[start, end]` range of instants that a view or synchronization
/// pass operates over. An occurrence starting exactly at `end` is in-window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> HearthwayResult<Self> {
        if end < start {
            return Err(HearthwayError::InvalidWindow(format!(
                "window end {} precedes start {}",
                end, start
            )));
        }
        Ok(DateWindow { start, end })
    }

    /// Build a window from whole calendar dates: start-of-day on `from`
    /// through end-of-day on `to`.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> HearthwayResult<Self> {
        let start = from.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let end = to.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc());
        match (start, end) {
            (Some(start), Some(end)) => DateWindow::new(start, end),
            _ => Err(HearthwayError::InvalidWindow(format!(
                "unrepresentable date bounds {} / {}",
                from, to
            ))),
        }
    }

    /// Default window: ±DEFAULT_WINDOW_DAYS around the given instant.
    pub fn default_around(now: DateTime<Utc>) -> Self {
        DateWindow {
            start: now - Duration::days(DEFAULT_WINDOW_DAYS),
            end: now + Duration::days(DEFAULT_WINDOW_DAYS),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether an instant falls inside the closed window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Iterate the calendar dates the window covers, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let first = self.start.date_naive();
        let last = self.end.date_naive();
        let count = (last - first).num_days() + 1;
        (0..count).map(move |offset| first + Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rejects_inverted_window() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert!(DateWindow::new(start, end).is_err());
    }

    #[test]
    fn test_from_dates_spans_whole_days() {
        let window = DateWindow::from_dates(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
        .unwrap();

        assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_days_covers_every_date_once() {
        let window = DateWindow::from_dates(
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        )
        .unwrap();

        let days: Vec<NaiveDate> = window.days().collect();
        assert_eq!(days.len(), 5); // leap year: Feb 27, 28, 29, Mar 1, 2
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(days[4], NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }
}
