use axum::extract::FromRequestParts;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use mockall::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

use hourbook_api::middleware::auth::AuthUser;
use hourbook_api::middleware::error_handling::AppError;
use hourbook_core::errors::BookingError;

use crate::test_utils::TestContext;

#[rstest]
#[case(BookingError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::InvalidProvider("not a provider".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::PastDate("in the past".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::SelfBooking("own slot".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Unauthenticated("no token".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Forbidden("not yours".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::WindowExpired("too late".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::SlotUnavailable("taken".into()), StatusCode::CONFLICT)]
#[case(BookingError::AlreadyCanceled("done".into()), StatusCode::CONFLICT)]
#[case(BookingError::Dependency(eyre::eyre!("pool down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_auth_user_resolves_bearer_token() {
    let mut ctx = TestContext::new();
    let user_id = Uuid::new_v4();

    ctx.identity
        .expect_authenticate()
        .with(predicate::eq("tok-123"))
        .returning(move |_| Ok(user_id));

    let state = ctx.build_state();

    let request = Request::builder()
        .uri("/api/appointments")
        .header(header::AUTHORIZATION, "Bearer tok-123")
        .body(())
        .expect("request");
    let (mut parts, _) = request.into_parts();

    let auth = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect("token should resolve");

    assert_eq!(auth.0, user_id);
}

#[tokio::test]
async fn test_auth_user_missing_header_is_unauthorized() {
    let state = TestContext::new().build_state();

    let request = Request::builder()
        .uri("/api/appointments")
        .body(())
        .expect("request");
    let (mut parts, _) = request.into_parts();

    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect_err("missing header must be rejected");

    assert!(matches!(err.0, BookingError::Unauthenticated(_)), "got: {:?}", err.0);
}

#[tokio::test]
async fn test_auth_user_rejects_non_bearer_scheme() {
    let state = TestContext::new().build_state();

    let request = Request::builder()
        .uri("/api/appointments")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(())
        .expect("request");
    let (mut parts, _) = request.into_parts();

    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect_err("non-bearer scheme must be rejected");

    assert!(matches!(err.0, BookingError::Unauthenticated(_)), "got: {:?}", err.0);
}

#[tokio::test]
async fn test_auth_user_unknown_token_is_unauthorized() {
    let mut ctx = TestContext::new();

    ctx.identity
        .expect_authenticate()
        .returning(|_| Err(BookingError::Unauthenticated("Invalid token".to_string())));

    let state = ctx.build_state();

    let request = Request::builder()
        .uri("/api/appointments")
        .header(header::AUTHORIZATION, "Bearer expired")
        .body(())
        .expect("request");
    let (mut parts, _) = request.into_parts();

    let err = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .expect_err("unknown token must be rejected");

    assert!(matches!(err.0, BookingError::Unauthenticated(_)), "got: {:?}", err.0);
}
