use crate::models::DbUser;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    tracing::debug!("Getting user by id: {}", id);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, provider, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Resolves a user only when it is flagged as a provider.
pub async fn get_provider_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    tracing::debug!("Getting provider by id: {}", id);

    let provider = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, provider, created_at
        FROM users
        WHERE id = $1 AND provider = TRUE
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(provider)
}

pub async fn list_providers(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    tracing::debug!("Listing providers");

    let providers = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, provider, created_at
        FROM users
        WHERE provider = TRUE
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(providers)
}

/// Resolves a bearer token to its owning user id.
pub async fn find_user_id_by_token(pool: &Pool<Postgres>, token: &str) -> Result<Option<Uuid>> {
    let user_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT user_id
        FROM auth_tokens
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user_id)
}
