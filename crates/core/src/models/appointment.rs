use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::ProviderSummary;
use crate::time;

/// A booked slot between a client and a provider.
///
/// `scheduled_at` is always hour-aligned. `canceled_at` is set exactly once;
/// a cancelled appointment is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Whether the slot lies before the given instant.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at < now
    }

    /// Whether the appointment can still be cancelled at the given instant.
    ///
    /// Requires an active appointment and an instant strictly before the
    /// two-hour cancellation deadline.
    pub fn is_cancelable(&self, now: DateTime<Utc>) -> bool {
        self.canceled_at.is_none() && now < time::cancellation_deadline(self.scheduled_at)
    }
}

/// Record handed to the store on a successful booking.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

/// Appointment joined with the display fields the cancellation mail needs.
///
/// Assembled by the store in a single read, replacing implicit relation
/// loading in the engines.
#[derive(Debug, Clone)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub provider_name: String,
    pub provider_email: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub provider_id: Option<Uuid>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub provider_id: Uuid,
    pub client_id: Uuid,
    pub canceled_at: Option<DateTime<Utc>>,
    pub past: bool,
    pub cancelable: bool,
}

impl AppointmentResponse {
    /// Builds the wire representation, deriving `past` and `cancelable`
    /// against the supplied instant.
    pub fn from_appointment(appointment: &Appointment, now: DateTime<Utc>) -> Self {
        Self {
            id: appointment.id,
            date: appointment.scheduled_at,
            provider_id: appointment.provider_id,
            client_id: appointment.client_id,
            canceled_at: appointment.canceled_at,
            past: appointment.is_past(now),
            cancelable: appointment.is_cancelable(now),
        }
    }
}

/// One entry of the client's appointment listing, provider summary embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentListItem {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub past: bool,
    pub cancelable: bool,
    pub provider: ProviderSummary,
}
