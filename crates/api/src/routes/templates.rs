use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// ```text
/// GET /templates  -> list_templates
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/templates", get(templates::list_templates))
}
