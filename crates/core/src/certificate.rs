//! Structured certificate fields extracted from free text.
//!
//! The language model is asked to reply with a JSON object in exactly this
//! shape. Parsing is strict: every printable field must be present and be a
//! string, and `signatures` must be an array of `{name, title}` pairs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Literal forced into [`CertificateFields::opening_phrase`] after parsing.
pub const DEFAULT_OPENING_PHRASE: &str = "This";

/// One signature block printed at the bottom of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub title: String,
}

/// The printable content of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFields {
    pub institution: String,
    pub department: String,
    pub location: String,
    /// Overwritten after parsing, so the model may omit it.
    #[serde(default)]
    pub opening_phrase: String,
    pub certificate_title: String,
    pub pre_recipient_phrase: String,
    pub recipient_name: String,
    pub purpose_phrase: String,
    pub role: String,
    pub event_details: String,
    pub date_place: String,
    pub signatures: Vec<Signature>,
}

impl CertificateFields {
    /// Parse a raw model reply into fields.
    ///
    /// Surrounding whitespace and a single Markdown code fence (```` ```json ````)
    /// are tolerated; anything else that is not a complete object of the
    /// expected shape is rejected.
    pub fn from_model_output(raw: &str) -> Result<Self, CoreError> {
        let body = strip_code_fence(raw.trim());
        if body.is_empty() {
            return Err(CoreError::UpstreamFailure(
                "Model returned an empty reply".to_string(),
            ));
        }
        serde_json::from_str(body).map_err(|e| {
            CoreError::UpstreamFailure(format!("Model reply is not valid certificate JSON: {e}"))
        })
    }

    /// Force the opening phrase to [`DEFAULT_OPENING_PHRASE`].
    pub fn apply_default_opening_phrase(&mut self) {
        self.opening_phrase = DEFAULT_OPENING_PHRASE.to_string();
    }
}

/// Remove one enclosing Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
