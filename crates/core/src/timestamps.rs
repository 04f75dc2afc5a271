//! Server-side timestamp assignment.

use chrono::{Duration, Utc};

use crate::types::Timestamp;

/// Smallest step a modification timestamp advances by.
///
/// PostgreSQL stores microseconds, so both backends use the same unit.
pub const MODIFIED_STEP_MICROS: i64 = 1;

/// Current UTC time.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Compute the next `updated_at` for a record last modified at `previous`.
///
/// The result is `now` unless the clock has not moved past `previous`, in
/// which case it is `previous` plus one step. `updated_at` therefore
/// strictly increases across successive updates.
pub fn next_modified(previous: Timestamp, now: Timestamp) -> Timestamp {
    now.max(previous + Duration::microseconds(MODIFIED_STEP_MICROS))
}

/// [`next_modified`] against the wall clock.
pub fn bump_modified(previous: Timestamp) -> Timestamp {
    next_modified(previous, now())
}
