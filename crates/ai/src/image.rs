//! Image generation for certificate decoration.

use std::sync::Arc;
use std::time::Duration;

use certgen_core::error::CoreError;
use certgen_core::image_size::determine_image_size;
use certgen_core::prompt::{corner_frame_prompt, CornerStyle};
use serde::Deserialize;

use crate::provider::{ImageModel, ImageRequest, ProviderError};

/// Default deadline for one image-generation call.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Errors from [`ImageGateway`].
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error(transparent)]
    Provider(ProviderError),

    #[error("image model call timed out")]
    Timeout,
}

impl From<ImageError> for CoreError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Provider(e) => CoreError::UpstreamFailure(e.to_string()),
            ImageError::Timeout => CoreError::Timeout {
                service: "image model",
            },
        }
    }
}

/// Request for decorative corner art.
#[derive(Debug, Clone, Deserialize)]
pub struct CornerFrameRequest {
    pub theme: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub style: CornerStyle,
    pub width: f64,
    pub height: f64,
}

/// Generates single images through an [`ImageModel`].
pub struct ImageGateway {
    model: Arc<dyn ImageModel>,
    deadline: Duration,
}

impl ImageGateway {
    pub fn new(model: Arc<dyn ImageModel>, deadline: Duration) -> Self {
        Self { model, deadline }
    }

    /// Generate one image for a `width` x `height` canvas.
    ///
    /// Returns the URL of the first image, or an empty string when the
    /// provider answered without any image. Callers must treat `""` as "no
    /// image produced", not as an error.
    pub async fn generate_image(
        &self,
        prompt: &str,
        width: f64,
        height: f64,
    ) -> Result<String, ImageError> {
        let size = determine_image_size(width, height);
        let request = ImageRequest::single(prompt, size);

        match tokio::time::timeout(self.deadline, self.model.generate(&request)).await {
            Ok(Ok(generation)) => {
                let url = generation.first_url();
                if url.is_empty() {
                    tracing::warn!(%size, "Image model returned no image");
                }
                Ok(url)
            }
            Ok(Err(ProviderError::Timeout)) | Err(_) => {
                tracing::error!(%size, "Image model call timed out");
                Err(ImageError::Timeout)
            }
            Ok(Err(e)) => {
                tracing::error!(%size, error = %e, "Image generation failed");
                Err(ImageError::Provider(e))
            }
        }
    }

    /// Generate corner art from a theme, a palette and an intensity style.
    pub async fn generate_corner_frame(
        &self,
        request: &CornerFrameRequest,
    ) -> Result<String, ImageError> {
        let prompt = corner_frame_prompt(&request.theme, &request.colors, request.style);
        self.generate_image(&prompt, request.width, request.height).await
    }
}
