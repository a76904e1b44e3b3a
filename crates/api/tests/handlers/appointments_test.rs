use axum::extract::{Path, Query, State};
use axum::Json;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use hourbook_api::handlers::appointments::{
    cancel_appointment, create_appointment, list_appointments, ListQuery,
};
use hourbook_api::middleware::auth::AuthUser;
use hourbook_core::errors::BookingError;
use hourbook_core::models::appointment::{
    Appointment, AppointmentListItem, CreateAppointmentRequest,
};
use hourbook_core::models::user::ProviderSummary;

use crate::test_utils::{appointment, detail, instant, user, TestContext};

#[tokio::test]
async fn test_create_appointment_success() {
    let mut ctx = TestContext::new();
    let client_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();
    let slot = instant("2025-06-10T14:00:00Z");

    ctx.users
        .expect_find_provider()
        .with(predicate::eq(provider_id))
        .returning(move |id| Ok(Some(user(id, "Barber Bob", true))));
    ctx.users
        .expect_find_user()
        .returning(move |id| Ok(Some(user(id, "Ana Client", false))));
    ctx.store
        .expect_find_active_by_slot()
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_insert()
        .returning(move |new| Ok(appointment(new.client_id, new.provider_id, new.scheduled_at)));
    ctx.notifier.expect_notify().returning(|_| Ok(()));

    let state = ctx.build_state();
    let payload = CreateAppointmentRequest {
        provider_id: Some(provider_id),
        date: Some(instant("2025-06-10T14:22:10Z")),
    };

    let response = create_appointment(State(state), AuthUser(client_id), Json(payload))
        .await
        .expect("booking should succeed");

    assert_eq!(response.0.provider_id, provider_id);
    assert_eq!(response.0.client_id, client_id);
    assert_eq!(response.0.date, slot);
    assert_eq!(response.0.canceled_at, None);
    assert!(!response.0.past);
    assert!(response.0.cancelable);
}

#[tokio::test]
async fn test_create_appointment_occupied_slot_is_conflict() {
    let mut ctx = TestContext::new();
    let client_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();

    ctx.users
        .expect_find_provider()
        .returning(move |id| Ok(Some(user(id, "Barber Bob", true))));
    ctx.store
        .expect_find_active_by_slot()
        .returning(move |_, slot| Ok(Some(appointment(Uuid::new_v4(), provider_id, slot))));

    let state = ctx.build_state();
    let payload = CreateAppointmentRequest {
        provider_id: Some(provider_id),
        date: Some(instant("2025-06-10T14:00:00Z")),
    };

    let err = create_appointment(State(state), AuthUser(client_id), Json(payload))
        .await
        .expect_err("occupied slot must be rejected");

    assert!(matches!(err.0, BookingError::SlotUnavailable(_)), "got: {:?}", err.0);
}

#[tokio::test]
async fn test_list_appointments_passes_page_through() {
    let mut ctx = TestContext::new();
    let client_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();

    let items = vec![AppointmentListItem {
        id: Uuid::new_v4(),
        date: instant("2025-06-10T14:00:00Z"),
        past: false,
        cancelable: true,
        provider: ProviderSummary {
            id: provider_id,
            name: "Barber Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    }];
    let expected = items.clone();

    ctx.store
        .expect_list_for_client()
        .with(predicate::eq(client_id), predicate::eq(2u32))
        .returning(move |_, _| Ok(items.clone()));

    let state = ctx.build_state();

    let response = list_appointments(
        State(state),
        AuthUser(client_id),
        Query(ListQuery { page: Some(2) }),
    )
    .await
    .expect("listing should succeed");

    assert_eq!(response.0.len(), 1);
    assert_eq!(response.0[0].id, expected[0].id);
    assert_eq!(response.0[0].provider, expected[0].provider);
}

#[tokio::test]
async fn test_cancel_appointment_success() {
    let mut ctx = TestContext::new();
    let client_id = Uuid::new_v4();
    let now = ctx.now;

    let lookup = detail(client_id, instant("2025-06-10T14:00:00Z"));
    let appointment_id = lookup.appointment.id;
    let canceled = Appointment {
        canceled_at: Some(now),
        ..lookup.appointment.clone()
    };

    ctx.store
        .expect_find_by_id()
        .with(predicate::eq(appointment_id))
        .returning(move |_| Ok(Some(lookup.clone())));
    ctx.store
        .expect_cancel()
        .returning(move |_, _| Ok(Some(canceled.clone())));
    ctx.mailer
        .expect_send_cancellation()
        .times(1)
        .returning(|_| Ok(()));

    let state = ctx.build_state();

    let response = cancel_appointment(State(state), AuthUser(client_id), Path(appointment_id))
        .await
        .expect("cancellation should succeed");

    assert_eq!(response.0.id, appointment_id);
    assert_eq!(response.0.canceled_at, Some(now));
    assert!(!response.0.cancelable);
}

#[tokio::test]
async fn test_cancel_appointment_by_non_owner_is_forbidden() {
    let mut ctx = TestContext::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let lookup = detail(owner, instant("2025-06-10T14:00:00Z"));
    let appointment_id = lookup.appointment.id;

    ctx.store
        .expect_find_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));

    let state = ctx.build_state();

    let err = cancel_appointment(State(state), AuthUser(intruder), Path(appointment_id))
        .await
        .expect_err("non-owner must be rejected");

    assert!(matches!(err.0, BookingError::Forbidden(_)), "got: {:?}", err.0);
}
