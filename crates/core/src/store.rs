//! Persistence contracts consumed by the engines.
//!
//! The store owns every multi-row concern: slot exclusivity is enforced
//! atomically at insert time, and the cancel mutation is a single-row
//! compare-and-set, so the engines stay free of read-modify-write races.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::appointment::{
    Appointment, AppointmentDetail, AppointmentListItem, NewAppointment,
};
use crate::models::user::User;

/// Appointments page size for the client listing.
pub const LIST_PAGE_SIZE: u32 = 10;

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Persists a new active appointment.
    ///
    /// Implementations must enforce slot exclusivity atomically and report
    /// a conflicting active appointment as `BookingError::SlotUnavailable`,
    /// so concurrent bookings for the same slot cannot both succeed.
    async fn insert(&self, new: NewAppointment) -> BookingResult<Appointment>;

    /// Looks up the active appointment occupying a provider's slot, if any.
    async fn find_active_by_slot(
        &self,
        provider_id: Uuid,
        slot: DateTime<Utc>,
    ) -> BookingResult<Option<Appointment>>;

    /// Loads an appointment together with the provider/client display
    /// fields the cancellation mail needs.
    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<AppointmentDetail>>;

    /// Marks an appointment cancelled at the given instant.
    ///
    /// Must only succeed for an appointment that is still active; returns
    /// `None` when the appointment was already cancelled (including a
    /// concurrent cancel that won the race).
    async fn cancel(&self, id: Uuid, at: DateTime<Utc>) -> BookingResult<Option<Appointment>>;

    /// Active appointments of a client, ordered by slot ascending,
    /// paginated at [`LIST_PAGE_SIZE`] with provider summaries embedded.
    async fn list_for_client(
        &self,
        client_id: Uuid,
        page: u32,
    ) -> BookingResult<Vec<AppointmentListItem>>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves a user only if it is flagged as a provider.
    async fn find_provider(&self, id: Uuid) -> BookingResult<Option<User>>;

    /// Resolves any user.
    async fn find_user(&self, id: Uuid) -> BookingResult<Option<User>>;

    /// All users flagged as providers.
    async fn list_providers(&self) -> BookingResult<Vec<User>>;
}
