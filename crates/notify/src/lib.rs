//! # Hourbook Notify
//!
//! Side-effect delivery for the booking engines. Booking notices and
//! cancellation mails are enqueued on a bounded channel and delivered by a
//! background worker, so a slow notification or mail backend never stalls
//! a booking or cancellation response.
//!
//! The engines talk to [`queue::QueuedNotifier`] and [`queue::QueuedMailer`]
//! through the core dispatch traits; the worker owns the real backends
//! ([`dispatcher::StoreNotifier`] and the mailers in [`mailer`]).

/// Notification backend persisting provider notifications
pub mod dispatcher;
/// Mail delivery backends
pub mod mailer;
/// Queue-backed implementations of the dispatch traits
pub mod queue;
/// The background delivery worker
pub mod worker;
