//! # Authentication Module
//!
//! Bearer-token identity extraction for the Hourbook API. The extractor
//! pulls the `Authorization: Bearer <token>` header and resolves it to an
//! actor id through the configured [`IdentityProvider`] collaborator.
//!
//! Token issuance and credential verification are outside this service;
//! handlers only ever see the resolved actor id.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use hourbook_core::errors::BookingError;

use crate::middleware::error_handling::AppError;
use crate::ApiState;

/// The authenticated actor of the current request.
///
/// Adding this extractor to a handler makes the route require a valid
/// bearer token; requests without one are rejected with 401 before the
/// handler body runs.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                AppError(BookingError::Unauthenticated(
                    "Missing authorization header".to_string(),
                ))
            })?
            .to_str()
            .map_err(|_| {
                AppError(BookingError::Unauthenticated(
                    "Malformed authorization header".to_string(),
                ))
            })?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(BookingError::Unauthenticated(
                "Malformed authorization header".to_string(),
            ))
        })?;

        let user_id = state.identity.authenticate(token).await?;

        Ok(AuthUser(user_id))
    }
}
