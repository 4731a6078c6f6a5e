//! Route definitions for the `/images` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST /               -> generate_image
/// POST /corner-frame   -> generate_corner_frame
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(images::generate_image))
        .route("/corner-frame", post(images::generate_corner_frame))
}
