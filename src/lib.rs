//! Core scheduling engine for the Hearthway household planner.
//!
//! This crate owns the one genuinely stateful problem in the app: turning
//! recurring event definitions into concrete occurrences for a date window,
//! and materializing a duty record for each occurrence that needs one —
//! exactly once, without ever clobbering a duty a person has already edited.
//!
//! The UI layer's data-access services call into [`engine::SyncEngine`];
//! everything underneath it is pure or goes through the narrow store
//! contracts in [`store`].

pub mod constants;
pub mod context;
pub mod date_window;
pub mod duty;
pub mod engine;
pub mod error;
pub mod event;
pub mod loader;
pub mod occurrence;
pub mod recurrence;
pub mod store;
pub mod sync;
pub mod view;

// Re-export the main types at crate root for convenience
pub use context::HouseholdContext;
pub use date_window::DateWindow;
pub use duty::{DutyRecord, DutyStatus};
pub use engine::{SyncEngine, SyncOutcome};
pub use error::{HearthwayError, HearthwayResult};
pub use event::{EventDefinition, Recurrence};
pub use occurrence::Occurrence;
pub use store::{CreateOutcome, DutyStore, EventStore};
pub use sync::SyncFailure;
pub use view::DayGroup;
