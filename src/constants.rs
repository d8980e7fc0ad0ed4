//! Shared constants.

/// Default number of days a window spans on either side of "now" when the
/// caller doesn't ask for a specific range.
pub const DEFAULT_WINDOW_DAYS: i64 = 14;
