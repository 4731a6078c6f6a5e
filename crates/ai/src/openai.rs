//! HTTP client for OpenAI-compatible chat-completion and image endpoints.
//!
//! One [`OpenAiClient`] serves both provider seams: `POST /chat/completions`
//! for field extraction and `POST /images/generations` for corner art.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::provider::{ImageGeneration, ImageModel, ImageRequest, LanguageModel, ProviderError};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for field extraction.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default model used for image generation.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Connection settings for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Secret API key sent as a bearer token.
    pub api_key: String,
    /// Base URL without a trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
    /// Per-request deadline applied by the HTTP client.
    pub timeout: Duration,
}

/// HTTP client for an OpenAI-compatible provider.
pub struct OpenAiClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    n: u8,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a ImageRequest,
}

impl ChatCompletion {
    /// Text of the first choice, if it holds any.
    fn into_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyCompletion)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl OpenAiClient {
    /// Build a client with the configured deadline.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// POST a JSON body and decode the JSON reply.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Turn a non-2xx response into [`ProviderError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            n: 1,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let completion: ChatCompletion = self.post_json("chat/completions", &body).await?;
        completion.into_text()
    }
}

#[async_trait]
impl ImageModel for OpenAiClient {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageGeneration, ProviderError> {
        let body = ImageGenerationRequest {
            model: &self.config.image_model,
            request,
        };
        self.post_json("images/generations", &body).await
    }
}
