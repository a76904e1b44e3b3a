use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use hourbook_core::models::appointment::{
    AppointmentListItem, AppointmentResponse, CreateAppointmentRequest,
};

use crate::middleware::{auth::AuthUser, error_handling::AppError};
use crate::ApiState;

/// Query parameters for the appointment listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 1-based page number (default: 1)
    pub page: Option<u32>,
}

/// Books a slot with a provider on behalf of the authenticated client.
///
/// All rule checks (provider flag, hour alignment, future slot, no
/// self-booking, slot availability) run inside the scheduling engine;
/// the first violated rule is returned as the response.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.scheduling.schedule(auth.0, payload).await?;

    let response = AppointmentResponse::from_appointment(&appointment, state.clock.now());

    Ok(Json(response))
}

/// Lists the authenticated client's active appointments.
///
/// Results are ordered by slot ascending and paginated at a fixed page
/// size, with the provider summary embedded in every entry.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AppointmentListItem>>, AppError> {
    let page = query.page.unwrap_or(1);

    let appointments = state.appointments.list_for_client(auth.0, page).await?;

    Ok(Json(appointments))
}

/// Cancels an appointment owned by the authenticated client.
///
/// Ownership, cancellation state, and the two-hour window are enforced by
/// the cancellation engine.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = state.cancellation.cancel(auth.0, id).await?;

    let response = AppointmentResponse::from_appointment(&appointment, state.clock.now());

    Ok(Json(response))
}
