use async_trait::async_trait;

use hourbook_core::dispatch::{BookingNotice, Notifier};
use hourbook_db::repositories::notification;
use hourbook_db::DbPool;

/// Persists booking notices as provider notifications.
///
/// This is the delivery backend behind the queue; the provider reads the
/// stored notifications through the API.
#[derive(Clone)]
pub struct StoreNotifier {
    pool: DbPool,
}

impl StoreNotifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Notifier for StoreNotifier {
    async fn notify(&self, notice: BookingNotice) -> eyre::Result<()> {
        notification::create_notification(
            &self.pool,
            notice.recipient_id,
            &notice.content,
            notice.created_at,
        )
        .await?;

        Ok(())
    }
}
