use axum::{extract::State, Json};
use std::sync::Arc;

use hourbook_core::models::user::ProviderResponse;

use crate::middleware::{auth::AuthUser, error_handling::AppError};
use crate::ApiState;

/// Lists every user eligible to receive bookings.
#[axum::debug_handler]
pub async fn list_providers(
    State(state): State<Arc<ApiState>>,
    _auth: AuthUser,
) -> Result<Json<Vec<ProviderResponse>>, AppError> {
    let providers = state.users.list_providers().await?;

    let response = providers.iter().map(ProviderResponse::from).collect();

    Ok(Json(response))
}
