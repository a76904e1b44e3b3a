use crate::models::DbNotification;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Most recent notifications returned per listing request.
const NOTIFICATION_LIMIT: i64 = 20;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    recipient_id: Uuid,
    content: &str,
    created_at: DateTime<Utc>,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating notification: id={}, recipient_id={}",
        id,
        recipient_id
    );

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, recipient_id, content, read, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        RETURNING id, recipient_id, content, read, created_at
        "#,
    )
    .bind(id)
    .bind(recipient_id)
    .bind(content)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn list_for_recipient(
    pool: &Pool<Postgres>,
    recipient_id: Uuid,
) -> Result<Vec<DbNotification>> {
    tracing::debug!("Listing notifications: recipient_id={}", recipient_id);

    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, recipient_id, content, read, created_at
        FROM notifications
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(recipient_id)
    .bind(NOTIFICATION_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

/// Marks a notification read, scoped to its recipient so callers cannot
/// touch notifications addressed to someone else.
pub async fn mark_read(
    pool: &Pool<Postgres>,
    id: Uuid,
    recipient_id: Uuid,
) -> Result<Option<DbNotification>> {
    tracing::debug!("Marking notification read: id={}", id);

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        UPDATE notifications
        SET read = TRUE
        WHERE id = $1 AND recipient_id = $2
        RETURNING id, recipient_id, content, read, created_at
        "#,
    )
    .bind(id)
    .bind(recipient_id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}
