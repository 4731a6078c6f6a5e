//! Handlers for image generation.

use axum::extract::State;
use axum::Json;
use certgen_ai::image::CornerFrameRequest;
use certgen_core::error::CoreError;
use certgen_core::prompt::validate_prompt;
use serde::Deserialize;

use crate::error::AppResult;
use crate::json::AppJson;
use crate::response::ImageUrlResponse;
use crate::state::AppState;

/// Request body for `POST /api/images`.
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
    pub width: f64,
    pub height: f64,
}

/// POST /api/images
///
/// Generate one image for a canvas of the given size.
pub async fn generate_image(
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerateImageRequest>,
) -> AppResult<Json<ImageUrlResponse>> {
    validate_prompt(&input.prompt)?;

    let url = state
        .images
        .generate_image(&input.prompt, input.width, input.height)
        .await
        .map_err(CoreError::from)?;

    Ok(Json(ImageUrlResponse { url }))
}

/// POST /api/images/corner-frame
///
/// Generate decorative corner art from a theme, palette and intensity.
pub async fn generate_corner_frame(
    State(state): State<AppState>,
    AppJson(input): AppJson<CornerFrameRequest>,
) -> AppResult<Json<ImageUrlResponse>> {
    if input.theme.trim().is_empty() {
        return Err(CoreError::MissingInput("theme").into());
    }

    let url = state
        .images
        .generate_corner_frame(&input)
        .await
        .map_err(CoreError::from)?;

    tracing::info!(
        colors = input.colors.len(),
        subtle = input.style.subtle,
        bold = input.style.bold,
        produced = !url.is_empty(),
        "Corner frame generated",
    );

    Ok(Json(ImageUrlResponse { url }))
}
