use crate::models::{DbAppointment, DbAppointmentDetail};
use chrono::{DateTime, Utc};
use eyre::Result;
use hourbook_core::store::LIST_PAGE_SIZE;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts an active appointment.
///
/// The partial unique index on `(provider_id, scheduled_at) WHERE
/// canceled_at IS NULL` enforces slot exclusivity; a conflicting insert
/// fails with a unique violation that the store layer translates.
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    client_id: Uuid,
    provider_id: Uuid,
    scheduled_at: DateTime<Utc>,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, client_id={}, provider_id={}, scheduled_at={}",
        id,
        client_id,
        provider_id,
        scheduled_at
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, client_id, provider_id, scheduled_at, canceled_at, created_at)
        VALUES ($1, $2, $3, $4, NULL, $5)
        RETURNING id, client_id, provider_id, scheduled_at, canceled_at, created_at
        "#,
    )
    .bind(id)
    .bind(client_id)
    .bind(provider_id)
    .bind(scheduled_at)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Appointment created successfully: id={}", id);
    Ok(appointment)
}

pub async fn find_active_by_slot(
    pool: &Pool<Postgres>,
    provider_id: Uuid,
    slot: DateTime<Utc>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!(
        "Checking slot availability: provider_id={}, slot={}",
        provider_id,
        slot
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, client_id, provider_id, scheduled_at, canceled_at, created_at
        FROM appointments
        WHERE provider_id = $1 AND scheduled_at = $2 AND canceled_at IS NULL
        "#,
    )
    .bind(provider_id)
    .bind(slot)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Loads an appointment together with the provider and client display
/// fields, assembled in a single query.
pub async fn get_appointment_detail(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointmentDetail>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let detail = sqlx::query_as::<_, DbAppointmentDetail>(
        r#"
        SELECT a.id, a.client_id, a.provider_id, a.scheduled_at, a.canceled_at, a.created_at,
               p.name AS provider_name, p.email AS provider_email, c.name AS client_name
        FROM appointments a
        JOIN users p ON p.id = a.provider_id
        JOIN users c ON c.id = a.client_id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if detail.is_none() {
        tracing::debug!("Appointment not found: id={}", id);
    }

    Ok(detail)
}

/// Marks an appointment cancelled, guarded on the row still being active.
///
/// Returns `None` when the appointment does not exist or was already
/// cancelled, so a concurrent double-cancel mutates the row at most once.
pub async fn cancel_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Cancelling appointment: id={}, at={}", id, at);

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET canceled_at = $2
        WHERE id = $1 AND canceled_at IS NULL
        RETURNING id, client_id, provider_id, scheduled_at, canceled_at, created_at
        "#,
    )
    .bind(id)
    .bind(at)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Active appointments of a client ordered by slot, one fixed-size page at
/// a time, with provider display fields joined in.
pub async fn list_for_client(
    pool: &Pool<Postgres>,
    client_id: Uuid,
    page: u32,
) -> Result<Vec<DbAppointmentDetail>> {
    let page = page.max(1);
    let offset = (page - 1) * LIST_PAGE_SIZE;

    tracing::debug!("Listing appointments: client_id={}, page={}", client_id, page);

    let appointments = sqlx::query_as::<_, DbAppointmentDetail>(
        r#"
        SELECT a.id, a.client_id, a.provider_id, a.scheduled_at, a.canceled_at, a.created_at,
               p.name AS provider_name, p.email AS provider_email, c.name AS client_name
        FROM appointments a
        JOIN users p ON p.id = a.provider_id
        JOIN users c ON c.id = a.client_id
        WHERE a.client_id = $1 AND a.canceled_at IS NULL
        ORDER BY a.scheduled_at ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(client_id)
    .bind(i64::from(LIST_PAGE_SIZE))
    .bind(i64::from(offset))
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
