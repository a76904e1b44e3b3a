use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use hourbook_core::errors::BookingError;
use hourbook_core::models::notification::{Notification, NotificationResponse};
use hourbook_db::repositories::notification;

use crate::middleware::{auth::AuthUser, error_handling::AppError};
use crate::ApiState;

/// Lists the authenticated provider's most recent notifications.
///
/// Only providers receive booking notices, so the endpoint is gated on the
/// provider flag.
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    state.users.find_provider(auth.0).await?.ok_or_else(|| {
        BookingError::Forbidden("only providers can list notifications".to_string())
    })?;

    let rows = notification::list_for_recipient(&state.db_pool, auth.0)
        .await
        .map_err(BookingError::Dependency)?;

    let response = rows
        .into_iter()
        .map(|row| NotificationResponse::from(Notification::from(row)))
        .collect();

    Ok(Json(response))
}

/// Marks one of the caller's notifications as read.
#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, AppError> {
    let row = notification::mark_read(&state.db_pool, id, auth.0)
        .await
        .map_err(BookingError::Dependency)?
        .ok_or_else(|| BookingError::NotFound(format!("Notification {id} not found")))?;

    Ok(Json(NotificationResponse::from(Notification::from(row))))
}
