//! Event capacity rules
//!
//! Remaining slots are always derived from the advertised capacity and a
//! live application count; nothing here is cached or stored. The deadline
//! rule is independent of capacity and takes precedence over it.

use chrono::{DateTime, Duration, Utc};

/// Registration closes this long before the event starts
const REGISTRATION_CUTOFF_HOURS: i64 = 24;

/// Remaining slots for an event, clamped at zero
///
/// `applied_count` may legitimately exceed `slots_total` (capacity edited
/// down after applications came in); the result never goes negative.
pub fn remaining_slots(slots_total: i32, applied_count: i64) -> i64 {
    (i64::from(slots_total) - applied_count).max(0)
}

/// The exact instant registration closes for an event
pub fn registration_deadline(start_date: DateTime<Utc>) -> DateTime<Utc> {
    start_date - Duration::hours(REGISTRATION_CUTOFF_HOURS)
}

/// Whether registration is still open at `now`
pub fn registration_open(now: DateTime<Utc>, start_date: DateTime<Utc>) -> bool {
    now < registration_deadline(start_date)
}
