//! # Scheduling Engine
//!
//! Validates and creates appointments. Rules run in a fixed order and the
//! first violated rule wins:
//!
//! 1. `provider_id` and `date` must be present
//! 2. the target must be flagged as a provider
//! 3. the requested instant is truncated to the start of its hour
//! 4. the normalized slot must be strictly in the future
//! 5. a client cannot book themselves
//! 6. the slot must be free of active appointments for that provider
//!
//! Every rule that touches persisted state runs against the *normalized*
//! slot. The availability pre-check gives the common conflict a friendly
//! answer; the store's insert re-enforces exclusivity atomically, so a
//! concurrent booking that slips past the pre-check still surfaces as
//! `SlotUnavailable`.

use std::sync::Arc;

use uuid::Uuid;

use crate::dispatch::{BookingNotice, Notifier};
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{Appointment, CreateAppointmentRequest, NewAppointment};
use crate::store::{AppointmentStore, UserDirectory};
use crate::time::{self, Clock};

pub struct SchedulingEngine {
    store: Arc<dyn AppointmentStore>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl SchedulingEngine {
    pub fn new(
        store: Arc<dyn AppointmentStore>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            users,
            notifier,
            clock,
        }
    }

    /// Books a slot with a provider on behalf of `client_id`.
    ///
    /// On success the created appointment is returned and a booking notice
    /// is dispatched to the provider. Notice dispatch is best-effort: a
    /// failure is logged and the booking stands.
    pub async fn schedule(
        &self,
        client_id: Uuid,
        request: CreateAppointmentRequest,
    ) -> BookingResult<Appointment> {
        let provider_id = request
            .provider_id
            .ok_or_else(|| BookingError::Validation("provider_id is required".to_string()))?;
        let requested = request
            .date
            .ok_or_else(|| BookingError::Validation("date is required".to_string()))?;

        self.users
            .find_provider(provider_id)
            .await?
            .ok_or_else(|| {
                BookingError::InvalidProvider(
                    "appointments can only be booked with a provider".to_string(),
                )
            })?;

        let slot = time::start_of_hour(requested)?;
        let now = self.clock.now();

        if slot <= now {
            return Err(BookingError::PastDate(
                "appointments cannot be booked in the past".to_string(),
            ));
        }

        if client_id == provider_id {
            return Err(BookingError::SelfBooking(
                "providers cannot book an appointment with themselves".to_string(),
            ));
        }

        if self
            .store
            .find_active_by_slot(provider_id, slot)
            .await?
            .is_some()
        {
            return Err(BookingError::SlotUnavailable(
                "the requested slot is already booked".to_string(),
            ));
        }

        let appointment = self
            .store
            .insert(NewAppointment {
                client_id,
                provider_id,
                scheduled_at: slot,
            })
            .await?;

        tracing::info!(
            appointment_id = %appointment.id,
            %provider_id,
            %client_id,
            slot = %slot,
            "appointment booked"
        );

        let client_name = match self.users.find_user(client_id).await {
            Ok(Some(client)) => client.name,
            Ok(None) => client_id.to_string(),
            Err(err) => {
                tracing::warn!("failed to resolve client name for notification: {err}");
                client_id.to_string()
            }
        };

        let notice = BookingNotice {
            recipient_id: provider_id,
            content: format!(
                "New appointment with {client_name} on {}",
                time::format_slot(&slot)
            ),
            created_at: now,
        };

        if let Err(err) = self.notifier.notify(notice).await {
            tracing::warn!(
                appointment_id = %appointment.id,
                "failed to dispatch booking notice: {err}"
            );
        }

        Ok(appointment)
    }
}
