//! Handlers for template metadata.

use axum::extract::State;
use axum::Json;
use certgen_db::models::template::Template;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/templates
///
/// List the caller's templates, newest first.
pub async fn list_templates(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Template>>>> {
    let templates = state.records.list_templates(user.user_id).await?;
    Ok(Json(DataResponse { data: templates }))
}
