use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::dispatch::{BookingNotice, CancellationMail, Mailer, Notifier};
use crate::errors::BookingResult;
use crate::identity::IdentityProvider;
use crate::models::appointment::{
    Appointment, AppointmentDetail, AppointmentListItem, NewAppointment,
};
use crate::models::user::User;
use crate::store::{AppointmentStore, UserDirectory};
use crate::time::Clock;

// Mock collaborators for testing

mock! {
    pub AppointmentStore {}

    #[async_trait]
    impl AppointmentStore for AppointmentStore {
        async fn insert(&self, new: NewAppointment) -> BookingResult<Appointment>;

        async fn find_active_by_slot(
            &self,
            provider_id: Uuid,
            slot: DateTime<Utc>,
        ) -> BookingResult<Option<Appointment>>;

        async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<AppointmentDetail>>;

        async fn cancel(
            &self,
            id: Uuid,
            at: DateTime<Utc>,
        ) -> BookingResult<Option<Appointment>>;

        async fn list_for_client(
            &self,
            client_id: Uuid,
            page: u32,
        ) -> BookingResult<Vec<AppointmentListItem>>;
    }
}

mock! {
    pub UserDirectory {}

    #[async_trait]
    impl UserDirectory for UserDirectory {
        async fn find_provider(&self, id: Uuid) -> BookingResult<Option<User>>;

        async fn find_user(&self, id: Uuid) -> BookingResult<Option<User>>;

        async fn list_providers(&self) -> BookingResult<Vec<User>>;
    }
}

mock! {
    pub Notifier {}

    #[async_trait]
    impl Notifier for Notifier {
        async fn notify(&self, notice: BookingNotice) -> eyre::Result<()>;
    }
}

mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_cancellation(&self, mail: CancellationMail) -> eyre::Result<()>;
    }
}

mock! {
    pub IdentityProvider {}

    #[async_trait]
    impl IdentityProvider for IdentityProvider {
        async fn authenticate(&self, token: &str) -> BookingResult<Uuid>;
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
