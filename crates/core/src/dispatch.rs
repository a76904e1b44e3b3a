//! Outbound side-effect contracts.
//!
//! Both collaborators are fire-and-forget from the engines' perspective: a
//! delivery failure is logged by the caller and never fails the booking or
//! cancellation that produced the event.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// "A provider was booked" event, addressed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// "An appointment was cancelled" mail event, addressed to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationMail {
    /// Recipient address, `Name <email>` form.
    pub to: String,
    pub provider_name: String,
    pub client_name: String,
    pub formatted_date: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: BookingNotice) -> eyre::Result<()>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()>;
}
