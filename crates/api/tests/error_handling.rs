//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error kind, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use certgen_api::error::AppError;
use certgen_core::error::CoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: MissingInput and MissingIdentifier map to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_input_returns_400() {
    let (status, json) = error_to_response(CoreError::MissingInput("prompt").into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["kind"], "missing_input");
    assert_eq!(json["error"]["message"], "Missing required input: prompt");
}

#[tokio::test]
async fn missing_identifier_returns_400() {
    let (status, json) = error_to_response(CoreError::MissingIdentifier.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["kind"], "missing_identifier");
}

// ---------------------------------------------------------------------------
// Test: Unauthenticated maps to 401 with its own message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthenticated_returns_401() {
    let err = AppError::Core(CoreError::Unauthenticated("Missing bearer token".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["kind"], "unauthenticated");
    assert_eq!(json["error"]["message"], "Missing bearer token");
}

// ---------------------------------------------------------------------------
// Test: NotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Certificate",
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["kind"], "not_found");
    assert_eq!(json["error"]["message"], "Certificate not found");
}

// ---------------------------------------------------------------------------
// Test: UpstreamFailure maps to 500 without leaking provider detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_failure_returns_500_and_sanitizes() {
    let err = AppError::Core(CoreError::UpstreamFailure(
        "HTTP 401: invalid api key sk-live-123".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["kind"], "upstream_failure");
    assert!(
        !json.to_string().contains("sk-live"),
        "Upstream failure must not leak provider details"
    );
}

// ---------------------------------------------------------------------------
// Test: Timeout maps to 504
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_returns_504() {
    let err = AppError::Core(CoreError::Timeout {
        service: "language model",
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"]["kind"], "timeout");
    assert_eq!(
        json["error"]["message"],
        "Upstream call to language model timed out"
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with bad_request kind
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["kind"], "bad_request");
    assert_eq!(json["error"]["message"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: internal errors map to 500 and sanitize the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal(
        "listing certificates failed: password authentication failed".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["kind"], "internal");
    assert!(
        !json.to_string().contains("password"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"]["message"], "An internal error occurred");
}
