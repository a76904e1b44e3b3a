//! Postgres implementations of the core collaborator contracts.
//!
//! Thin adapters over the repository functions: rows are mapped into
//! domain types and infrastructure failures are wrapped as dependency
//! errors, keeping sqlx out of the engines entirely.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use hourbook_core::errors::{BookingError, BookingResult};
use hourbook_core::identity::IdentityProvider;
use hourbook_core::models::appointment::{
    Appointment, AppointmentDetail, AppointmentListItem, NewAppointment,
};
use hourbook_core::models::user::{ProviderSummary, User};
use hourbook_core::store::{AppointmentStore, UserDirectory};

use crate::repositories;
use crate::DbPool;

/// Whether an infrastructure error is a unique-constraint conflict.
///
/// The only unique index on the appointments table is the active-slot
/// index, so a violation on insert means the slot is taken.
fn is_unique_violation(report: &eyre::Report) -> bool {
    matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db))
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}

#[derive(Clone)]
pub struct PgAppointmentStore {
    pool: DbPool,
}

impl PgAppointmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn insert(&self, new: NewAppointment) -> BookingResult<Appointment> {
        match repositories::appointment::create_appointment(
            &self.pool,
            new.client_id,
            new.provider_id,
            new.scheduled_at,
        )
        .await
        {
            Ok(row) => Ok(row.into()),
            Err(report) if is_unique_violation(&report) => Err(BookingError::SlotUnavailable(
                "the requested slot is already booked".to_string(),
            )),
            Err(report) => Err(BookingError::Dependency(report)),
        }
    }

    async fn find_active_by_slot(
        &self,
        provider_id: Uuid,
        slot: DateTime<Utc>,
    ) -> BookingResult<Option<Appointment>> {
        let row = repositories::appointment::find_active_by_slot(&self.pool, provider_id, slot)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<AppointmentDetail>> {
        let row = repositories::appointment::get_appointment_detail(&self.pool, id)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(row.map(Into::into))
    }

    async fn cancel(&self, id: Uuid, at: DateTime<Utc>) -> BookingResult<Option<Appointment>> {
        let row = repositories::appointment::cancel_appointment(&self.pool, id, at)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(row.map(Into::into))
    }

    async fn list_for_client(
        &self,
        client_id: Uuid,
        page: u32,
    ) -> BookingResult<Vec<AppointmentListItem>> {
        let rows = repositories::appointment::list_for_client(&self.pool, client_id, page)
            .await
            .map_err(BookingError::Dependency)?;

        let now = Utc::now();
        let items = rows
            .into_iter()
            .map(|row| {
                let detail: AppointmentDetail = row.into();
                AppointmentListItem {
                    id: detail.appointment.id,
                    date: detail.appointment.scheduled_at,
                    past: detail.appointment.is_past(now),
                    cancelable: detail.appointment.is_cancelable(now),
                    provider: ProviderSummary {
                        id: detail.appointment.provider_id,
                        name: detail.provider_name,
                        email: detail.provider_email,
                    },
                }
            })
            .collect();

        Ok(items)
    }
}

#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_provider(&self, id: Uuid) -> BookingResult<Option<User>> {
        let row = repositories::user::get_provider_by_id(&self.pool, id)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(row.map(Into::into))
    }

    async fn find_user(&self, id: Uuid) -> BookingResult<Option<User>> {
        let row = repositories::user::get_user_by_id(&self.pool, id)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(row.map(Into::into))
    }

    async fn list_providers(&self) -> BookingResult<Vec<User>> {
        let rows = repositories::user::list_providers(&self.pool)
            .await
            .map_err(BookingError::Dependency)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: DbPool,
}

impl PgIdentityProvider {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn authenticate(&self, token: &str) -> BookingResult<Uuid> {
        let user_id = repositories::user::find_user_id_by_token(&self.pool, token)
            .await
            .map_err(BookingError::Dependency)?;

        user_id.ok_or_else(|| BookingError::Unauthenticated("Invalid token".to_string()))
    }
}
