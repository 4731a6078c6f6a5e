//! Route definitions for saved certificates.

use axum::routing::get;
use axum::Router;

use crate::handlers::certificates;
use crate::state::AppState;

/// ```text
/// GET /get-certificate?id=  -> get_certificate
/// GET /certificates         -> list_certificates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-certificate", get(certificates::get_certificate))
        .route("/certificates", get(certificates::list_certificates))
}
