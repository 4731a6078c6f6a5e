use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use certgen_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error": { "kind": ..., "message": ... } }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `certgen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body that could not be read or decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned in place of any internal detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Message returned in place of provider failure detail.
const UPSTREAM_MESSAGE: &str = "The upstream provider request failed";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::MissingInput(_) | CoreError::MissingIdentifier => {
                    (StatusCode::BAD_REQUEST, core.kind(), core.to_string())
                }
                CoreError::Unauthenticated(msg) => {
                    (StatusCode::UNAUTHORIZED, core.kind(), msg.clone())
                }
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, core.kind(), core.to_string()),
                CoreError::UpstreamFailure(msg) => {
                    tracing::error!(error = %msg, "Upstream failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        core.kind(),
                        UPSTREAM_MESSAGE.to_string(),
                    )
                }
                CoreError::Timeout { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, core.kind(), core.to_string())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        core.kind(),
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
        };

        let body = json!({
            "error": {
                "kind": kind,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
