//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("user repository error: relation \"users\" does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "select 1"}))
}

async fn body_of(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("performers only"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Booking not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("pool exhausted"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, header, payload) = body_of(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::invalid_request("duration must be at least 15 minutes")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "duration", "code": "too_short"}));

    let (status, header, payload) = body_of(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "duration must be at least 15 minutes");
    assert_eq!(
        payload.details(),
        Some(&json!({"field": "duration", "code": "too_short"}))
    );
}

#[rstest]
#[actix_web::test]
async fn errors_outside_a_trace_scope_omit_the_header() {
    let (_, header, payload) = body_of(&Error::not_found("missing")).await;

    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn scoped_trace_id_is_used_when_the_error_has_none() {
    let trace_id: TraceId = TraceId::from_header_or_generate(Some(TRACE_ID));
    let error = Error::not_found("missing");

    let (_, header, _) = TraceId::scope(trace_id, async { body_of(&error).await }).await;

    assert_eq!(header.as_deref(), Some(TRACE_ID));
}

#[test]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
