//! Route definitions for field extraction.

use axum::routing::post;
use axum::Router;

use crate::handlers::extract;
use crate::state::AppState;

/// ```text
/// POST /extract  -> extract_fields
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract::extract_fields))
}
