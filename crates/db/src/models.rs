use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use hourbook_core::models::appointment::{Appointment, AppointmentDetail};
use hourbook_core::models::notification::Notification;
use hourbook_core::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub provider: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Appointment row joined with the display fields needed by the
/// cancellation mail and the client listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentDetail {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub provider_name: String,
    pub provider_email: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            provider: row.provider,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Self {
            id: row.id,
            client_id: row.client_id,
            provider_id: row.provider_id,
            scheduled_at: row.scheduled_at,
            canceled_at: row.canceled_at,
            created_at: row.created_at,
        }
    }
}

impl From<DbAppointmentDetail> for AppointmentDetail {
    fn from(row: DbAppointmentDetail) -> Self {
        Self {
            appointment: Appointment {
                id: row.id,
                client_id: row.client_id,
                provider_id: row.provider_id,
                scheduled_at: row.scheduled_at,
                canceled_at: row.canceled_at,
                created_at: row.created_at,
            },
            provider_name: row.provider_name,
            provider_email: row.provider_email,
            client_name: row.client_name,
        }
    }
}

impl From<DbNotification> for Notification {
    fn from(row: DbNotification) -> Self {
        Self {
            id: row.id,
            recipient_id: row.recipient_id,
            content: row.content,
            read: row.read,
            created_at: row.created_at,
        }
    }
}
