pub mod certificates;
pub mod extract;
pub mod health;
pub mod images;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /extract                     field extraction (POST)
///
/// /images                      generic image (POST)
/// /images/corner-frame         corner art (POST)
///
/// /get-certificate?id=         owned certificate (GET, bearer token)
/// /certificates                caller's certificates (GET, bearer token)
///
/// /templates                   caller's templates (GET, bearer token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(extract::router())
        .nest("/images", images::router())
        .merge(certificates::router())
        .merge(templates::router())
}
