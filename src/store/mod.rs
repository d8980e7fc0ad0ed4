//! Store contracts the engine talks through.
//!
//! The document store behind the app is swappable; this crate only depends
//! on these two narrow read/create surfaces. Duty mutation (assign, change
//! status) belongs to other subsystems and deliberately has no method here.

mod memory;

pub use memory::{MemoryDutyStore, MemoryEventStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::date_window::DateWindow;
use crate::duty::DutyRecord;
use crate::error::HearthwayResult;
use crate::event::EventDefinition;

/// Read access to stored event definitions.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events whose anchor start lies inside the closed window. Captures
    /// non-recurring events and recurring ones whose pattern begins
    /// in-window.
    async fn events_starting_in(
        &self,
        household_id: &str,
        window: &DateWindow,
    ) -> HearthwayResult<Vec<EventDefinition>>;

    /// Recurring events that started before `window_start` but whose
    /// recurrence has not ended by then. The predicate must be exactly
    /// "recurrence still live as of window start": weaker misses
    /// occurrences, stronger degrades to a full scan.
    async fn recurring_events_spanning(
        &self,
        household_id: &str,
        window_start: DateTime<Utc>,
    ) -> HearthwayResult<Vec<EventDefinition>>;
}

/// Result of a conditional duty create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was written; its id is echoed back.
    Created(String),
    /// A duty with the same materialization key already exists; nothing
    /// was written. This is how concurrent passes lose the race safely.
    AlreadyExists,
}

/// Read and conditional-create access to duty records.
#[async_trait]
pub trait DutyStore: Send + Sync {
    /// Duties whose date key falls inside the window (standalone ones
    /// included; the view renders them too).
    async fn duties_in(
        &self,
        household_id: &str,
        window: &DateWindow,
    ) -> HearthwayResult<Vec<DutyRecord>>;

    /// Create a duty unless one with its materialization key exists.
    ///
    /// The uniqueness decision has to live here, at the storage layer: an
    /// in-memory existence check and a write are not atomic across
    /// concurrent synchronization passes.
    async fn create(&self, record: DutyRecord) -> HearthwayResult<CreateOutcome>;
}
