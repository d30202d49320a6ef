//! Regression coverage for the domain error type.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("Not logged in"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::upstream("Invalid login credentials"), ErrorCode::UpstreamError)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let err = Error::try_new(ErrorCode::InvalidRequest, message).expect_err("blank message");
    assert_eq!(err, ErrorValidationError::EmptyMessage);
}

#[rstest]
fn new_substitutes_fallback_for_blank_messages() {
    let err = Error::new(ErrorCode::Unauthorized, " ");
    assert_eq!(err.message(), "Not logged in");
}

#[rstest]
fn display_uses_message() {
    let err = Error::upstream("User already registered");
    assert_eq!(err.to_string(), "User already registered");
}

#[rstest]
fn builders_attach_details_and_trace_id() {
    let err = Error::invalid_request("bad")
        .with_details(json!({ "field": "price" }))
        .with_trace_id("abc");
    assert_eq!(err.details(), Some(&json!({ "field": "price" })));
    assert_eq!(err.trace_id(), Some("abc"));
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let expected = trace_id.to_string();
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(expected.as_str()));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
fn error_codes_serialise_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::UpstreamError).expect("serialise code");
    assert_eq!(value, json!("upstream_error"));
}
