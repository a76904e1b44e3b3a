use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use uuid::Uuid;

use hourbook_core::models::appointment::{Appointment, AppointmentResponse};
use hourbook_core::models::notification::{Notification, NotificationResponse};
use hourbook_core::models::user::{ProviderResponse, User};

fn instant(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 instant")
}

fn appointment(slot: &str, canceled_at: Option<&str>) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        scheduled_at: instant(slot),
        canceled_at: canceled_at.map(instant),
        created_at: instant("2025-06-01T10:00:00Z"),
    }
}

#[test]
fn test_appointment_serialization() {
    let appointment = appointment("2025-06-10T14:00:00Z", None);

    let json = to_string(&appointment).expect("Failed to serialize appointment");
    let deserialized: Appointment = from_str(&json).expect("Failed to deserialize appointment");

    assert_eq!(deserialized.id, appointment.id);
    assert_eq!(deserialized.client_id, appointment.client_id);
    assert_eq!(deserialized.provider_id, appointment.provider_id);
    assert_eq!(deserialized.scheduled_at, appointment.scheduled_at);
    assert_eq!(deserialized.canceled_at, appointment.canceled_at);
}

#[rstest]
// slot behind the observer is past
#[case("2025-06-10T14:00:00Z", "2025-06-10T15:00:00Z", true)]
// slot ahead of the observer is not
#[case("2025-06-10T14:00:00Z", "2025-06-10T09:00:00Z", false)]
// the slot instant itself is not yet past
#[case("2025-06-10T14:00:00Z", "2025-06-10T14:00:00Z", false)]
fn test_appointment_is_past(#[case] slot: &str, #[case] now: &str, #[case] expected: bool) {
    assert_eq!(appointment(slot, None).is_past(instant(now)), expected);
}

#[rstest]
// comfortably before the window
#[case("2025-06-10T14:00:00Z", None, "2025-06-10T09:00:00Z", true)]
// a millisecond before the deadline still counts
#[case("2025-06-10T14:00:00Z", None, "2025-06-10T11:59:59.999Z", true)]
// exactly at the deadline the strict window has closed
#[case("2025-06-10T14:00:00Z", None, "2025-06-10T12:00:00Z", false)]
// inside the window
#[case("2025-06-10T14:00:00Z", None, "2025-06-10T13:00:00Z", false)]
// cancelled appointments are never cancelable again
#[case("2025-06-10T14:00:00Z", Some("2025-06-09T08:00:00Z"), "2025-06-10T09:00:00Z", false)]
fn test_appointment_is_cancelable(
    #[case] slot: &str,
    #[case] canceled_at: Option<&str>,
    #[case] now: &str,
    #[case] expected: bool,
) {
    assert_eq!(
        appointment(slot, canceled_at).is_cancelable(instant(now)),
        expected
    );
}

#[test]
fn test_appointment_response_derives_flags() {
    let appointment = appointment("2025-06-10T14:00:00Z", None);
    let now = instant("2025-06-10T09:00:00Z");

    let response = AppointmentResponse::from_appointment(&appointment, now);

    assert_eq!(response.id, appointment.id);
    assert_eq!(response.date, appointment.scheduled_at);
    assert_eq!(response.provider_id, appointment.provider_id);
    assert_eq!(response.client_id, appointment.client_id);
    assert_eq!(response.canceled_at, None);
    assert!(!response.past);
    assert!(response.cancelable);
}

#[test]
fn test_canceled_appointment_response_flags() {
    let appointment = appointment("2025-06-10T14:00:00Z", Some("2025-06-10T10:00:00Z"));
    let now = instant("2025-06-10T15:00:00Z");

    let response = AppointmentResponse::from_appointment(&appointment, now);

    assert_eq!(response.canceled_at, appointment.canceled_at);
    assert!(response.past);
    assert!(!response.cancelable);
}

#[test]
fn test_provider_response_from_user() {
    let user = User {
        id: Uuid::new_v4(),
        name: "Barber Bob".to_string(),
        email: "bob@example.com".to_string(),
        provider: true,
        created_at: instant("2025-01-01T00:00:00Z"),
    };

    let response = ProviderResponse::from(&user);

    assert_eq!(response.id, user.id);
    assert_eq!(response.name, "Barber Bob");
    assert_eq!(response.email, "bob@example.com");
}

#[test]
fn test_notification_response_from_notification() {
    let notification = Notification {
        id: Uuid::new_v4(),
        recipient_id: Uuid::new_v4(),
        content: "New appointment with Ana Client on Tuesday, June 10 at 14:00".to_string(),
        read: false,
        created_at: instant("2025-06-10T09:00:00Z"),
    };

    let response = NotificationResponse::from(notification.clone());

    assert_eq!(response.id, notification.id);
    assert_eq!(response.content, notification.content);
    assert!(!response.read);
    assert_eq!(response.created_at, notification.created_at);
}
