use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::BookingResult;

/// Resolves an opaque bearer token to an authenticated actor id.
///
/// Token issuance and credential verification live outside this service;
/// the engines only ever see the resolved actor id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> BookingResult<Uuid>;
}
