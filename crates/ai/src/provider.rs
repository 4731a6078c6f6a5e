//! Provider seams.
//!
//! Gateways only talk to providers through these traits so a fake can be
//! injected in tests and the HTTP client can be swapped without touching
//! gateway logic.

use async_trait::async_trait;
use certgen_core::image_size::ImageSize;
use serde::{Deserialize, Serialize};

/// Quality parameter sent with every image request.
pub const IMAGE_QUALITY: &str = "standard";

/// Style parameter sent with every image request.
pub const IMAGE_STYLE: &str = "natural";

/// Errors from a provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The call did not finish before its deadline.
    #[error("Provider request timed out")]
    Timeout,

    /// The provider answered but the reply held no text.
    #[error("Provider returned no completion text")]
    EmptyCompletion,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(err)
        }
    }
}

/// A text-completion model that returns a single textual output.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Parameters of one image-generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub quality: &'static str,
    pub style: &'static str,
    pub n: u8,
}

impl ImageRequest {
    /// A single image of `size` with the fixed quality and style.
    pub fn single(prompt: impl Into<String>, size: ImageSize) -> Self {
        Self {
            prompt: prompt.into(),
            size,
            quality: IMAGE_QUALITY,
            style: IMAGE_STYLE,
            n: 1,
        }
    }
}

/// One generated image entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedImage {
    #[serde(default)]
    pub url: Option<String>,
}

/// Reply of an image-generation call (`{ "data": [{ "url": ... }] }`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageGeneration {
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

impl ImageGeneration {
    /// URL of the first image, or an empty string when there is none.
    pub fn first_url(&self) -> String {
        self.data
            .first()
            .and_then(|image| image.url.clone())
            .unwrap_or_default()
    }
}

/// An image-generation model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageGeneration, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_request_uses_fixed_parameters() {
        let request = ImageRequest::single("laurel", ImageSize::Wide);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "laurel",
                "size": "1792x1024",
                "quality": "standard",
                "style": "natural",
                "n": 1
            })
        );
    }

    #[test]
    fn first_url_of_populated_reply() {
        let reply: ImageGeneration = serde_json::from_str(
            r#"{"created": 1, "data": [{"url": "https://img/1.png"}, {"url": "https://img/2.png"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.first_url(), "https://img/1.png");
    }

    #[test]
    fn first_url_degrades_to_empty_string() {
        let empty: ImageGeneration = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(empty.first_url(), "");

        let missing: ImageGeneration = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(missing.first_url(), "");

        let no_url: ImageGeneration = serde_json::from_str(r#"{"data": [{"b64_json": "..."}]}"#).unwrap();
        assert_eq!(no_url.first_url(), "");
    }
}
