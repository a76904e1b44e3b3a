//! # Cancellation Engine
//!
//! Performs the single active → cancelled transition. Ownership is checked
//! before cancellation state, so a non-owner learns nothing about an
//! appointment beyond its existence. Cancellation is only permitted
//! strictly more than two hours before the slot; the boundary instant
//! itself is already too late.
//!
//! A second cancel attempt is rejected with `AlreadyCanceled` and never
//! re-fires the mail event. The store mutation is a compare-and-set on the
//! active row, so a concurrent cancel that loses the race takes the same
//! rejection path.

use std::sync::Arc;

use uuid::Uuid;

use crate::dispatch::{CancellationMail, Mailer};
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::Appointment;
use crate::store::AppointmentStore;
use crate::time::{self, Clock};

pub struct CancellationEngine {
    store: Arc<dyn AppointmentStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
}

impl CancellationEngine {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            mailer,
            clock,
        }
    }

    /// Cancels an appointment on behalf of the client who booked it.
    ///
    /// On success the mutated appointment is returned and a cancellation
    /// mail event is dispatched to the provider. Mail dispatch is
    /// best-effort: a failure is logged and the cancellation stands.
    pub async fn cancel(
        &self,
        client_id: Uuid,
        appointment_id: Uuid,
    ) -> BookingResult<Appointment> {
        let detail = self
            .store
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Appointment {appointment_id} not found"))
            })?;

        if detail.appointment.client_id != client_id {
            return Err(BookingError::Forbidden(
                "only the client who booked an appointment may cancel it".to_string(),
            ));
        }

        if detail.appointment.canceled_at.is_some() {
            return Err(BookingError::AlreadyCanceled(
                "the appointment has already been cancelled".to_string(),
            ));
        }

        let now = self.clock.now();
        let deadline = time::cancellation_deadline(detail.appointment.scheduled_at);
        if now >= deadline {
            return Err(BookingError::WindowExpired(
                "appointments can only be cancelled more than 2 hours in advance".to_string(),
            ));
        }

        let canceled = self
            .store
            .cancel(appointment_id, now)
            .await?
            .ok_or_else(|| {
                BookingError::AlreadyCanceled(
                    "the appointment has already been cancelled".to_string(),
                )
            })?;

        tracing::info!(
            appointment_id = %canceled.id,
            client_id = %canceled.client_id,
            provider_id = %canceled.provider_id,
            "appointment cancelled"
        );

        let mail = CancellationMail {
            to: format!("{} <{}>", detail.provider_name, detail.provider_email),
            provider_name: detail.provider_name,
            client_name: detail.client_name,
            formatted_date: time::format_slot(&canceled.scheduled_at),
        };

        if let Err(err) = self.mailer.send_cancellation(mail).await {
            tracing::warn!(
                appointment_id = %canceled.id,
                "failed to dispatch cancellation mail: {err}"
            );
        }

        Ok(canceled)
    }
}
