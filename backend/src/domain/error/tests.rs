//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("upstream down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
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

#[test]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[test]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "date" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "details": { "field": "date" }
        })
    );
}

#[test]
fn service_unavailable_uses_snake_case_code() {
    let value = serde_json::to_value(ErrorCode::ServiceUnavailable).expect("serialise code");
    assert_eq!(value, json!("service_unavailable"));
}

#[test]
fn without_details_clears_payload() {
    let error = Error::internal("boom")
        .with_details(json!({ "secret": "x" }))
        .without_details();
    assert!(error.details().is_none());
}
