//! Clock abstraction and slot arithmetic.
//!
//! All bookings are hour-aligned: the requested instant is truncated to the
//! start of its hour before any rule that touches persisted state runs, so
//! two requests differing only in minutes compete for the same slot. The
//! cancellation window is the two hours immediately preceding a slot.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::errors::{BookingError, BookingResult};

/// Hours before the slot during which cancellation is no longer permitted.
pub const CANCELLATION_WINDOW_HOURS: i64 = 2;

/// Source of "now" for the engines.
///
/// Injected so tests can pin the current instant; production code uses
/// [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Truncates an instant to the start of its hour.
///
/// Sub-hour precision in the input is discarded silently. Truncation only
/// fails for instants outside chrono's representable range, which is
/// surfaced as a validation error on the requested date.
pub fn start_of_hour(instant: DateTime<Utc>) -> BookingResult<DateTime<Utc>> {
    instant
        .duration_trunc(Duration::hours(1))
        .map_err(|err| BookingError::Validation(format!("Invalid appointment date: {err}")))
}

/// Latest instant at which an appointment may still be cancelled.
///
/// Cancellation must happen strictly before this deadline.
pub fn cancellation_deadline(scheduled_at: DateTime<Utc>) -> DateTime<Utc> {
    scheduled_at - Duration::hours(CANCELLATION_WINDOW_HOURS)
}

/// Human-readable rendering of a slot for notifications and mail.
pub fn format_slot(slot: &DateTime<Utc>) -> String {
    slot.format("%A, %B %-d at %H:%M").to_string()
}
