//! Free-text to [`CertificateFields`] extraction.
//!
//! The gateway makes exactly one language-model call per request. Every
//! failure after input validation (transport, provider status, empty or
//! malformed reply) collapses into [`ExtractionError::Failed`]; the detail
//! is logged here and never reaches the caller.

use std::sync::Arc;
use std::time::Duration;

use certgen_core::certificate::CertificateFields;
use certgen_core::error::CoreError;
use certgen_core::prompt::{extraction_prompt, validate_prompt};

use crate::provider::{LanguageModel, ProviderError};

/// Default deadline for one language-model call.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

/// Errors from [`ExtractionGateway::extract`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("prompt is required")]
    MissingInput,

    #[error("extraction failed: {0}")]
    Failed(String),

    #[error("language model call timed out")]
    Timeout,
}

impl From<ExtractionError> for CoreError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingInput => CoreError::MissingInput("prompt"),
            ExtractionError::Failed(msg) => CoreError::UpstreamFailure(msg),
            ExtractionError::Timeout => CoreError::Timeout {
                service: "language model",
            },
        }
    }
}

/// Behaviour switches for [`ExtractionGateway`].
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    /// Keep whatever opening phrase the model produced instead of forcing
    /// [`DEFAULT_OPENING_PHRASE`](certgen_core::certificate::DEFAULT_OPENING_PHRASE).
    pub keep_model_opening_phrase: bool,
    /// Deadline for the language-model call.
    pub deadline: Duration,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            keep_model_opening_phrase: false,
            deadline: DEFAULT_DEADLINE,
        }
    }
}

/// Turns a free-text request into structured certificate fields.
pub struct ExtractionGateway {
    model: Arc<dyn LanguageModel>,
    settings: ExtractionSettings,
}

impl ExtractionGateway {
    pub fn new(model: Arc<dyn LanguageModel>, settings: ExtractionSettings) -> Self {
        Self { model, settings }
    }

    /// Extract certificate fields from `prompt`.
    ///
    /// A blank prompt fails with [`ExtractionError::MissingInput`] before the
    /// model is contacted.
    pub async fn extract(&self, prompt: &str) -> Result<CertificateFields, ExtractionError> {
        validate_prompt(prompt).map_err(|_| ExtractionError::MissingInput)?;

        let instruction = extraction_prompt(prompt);

        let call = self.model.complete(&instruction);
        let reply = match tokio::time::timeout(self.settings.deadline, call).await {
            Ok(Ok(text)) => text,
            Ok(Err(ProviderError::Timeout)) | Err(_) => {
                tracing::error!(
                    deadline_secs = self.settings.deadline.as_secs(),
                    "Language model call timed out"
                );
                return Err(ExtractionError::Timeout);
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Language model call failed");
                return Err(ExtractionError::Failed(e.to_string()));
            }
        };

        let mut fields = CertificateFields::from_model_output(&reply).map_err(|e| {
            tracing::error!(error = %e, reply_len = reply.len(), "Could not parse model reply");
            ExtractionError::Failed(e.to_string())
        })?;

        if !self.settings.keep_model_opening_phrase {
            fields.apply_default_opening_phrase();
        }

        tracing::debug!(
            recipient = %fields.recipient_name,
            signatures = fields.signatures.len(),
            "Extracted certificate fields"
        );

        Ok(fields)
    }
}
