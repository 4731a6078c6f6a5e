//! Handler for certificate field extraction.

use axum::extract::State;
use axum::Json;
use certgen_core::certificate::CertificateFields;
use certgen_core::error::CoreError;
use serde::Deserialize;

use crate::error::AppResult;
use crate::json::AppJson;
use crate::state::AppState;

/// Request body for `POST /api/extract`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /api/extract
///
/// Turn a free-text request into structured certificate fields. A missing
/// or blank prompt is a 400 and never reaches the language model.
pub async fn extract_fields(
    State(state): State<AppState>,
    AppJson(input): AppJson<ExtractRequest>,
) -> AppResult<Json<CertificateFields>> {
    let prompt = input.prompt.unwrap_or_default();

    let fields = state
        .extraction
        .extract(&prompt)
        .await
        .map_err(CoreError::from)?;

    Ok(Json(fields))
}
