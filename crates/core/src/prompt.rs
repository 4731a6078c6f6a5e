//! Prompt formatting for the language and image models.
//!
//! Two instruction builders live here: one wraps a user's free-text request
//! in field-extraction rules, the other turns a theme, a palette and an
//! intensity style into an image prompt for decorative corner art.

use serde::Deserialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Extraction instruction
// ---------------------------------------------------------------------------

/// Static rules prepended to every extraction request.
const EXTRACTION_RULES: &str = "\
You extract the printable content of a certificate from a short request.
Reply with a single JSON object and nothing else: no Markdown, no commentary.
Every key below must be present. Use an empty string for any value the
request does not mention, and an empty array when no signatures are given.
Keep the wording formal and concise. Do not invent names of people.";

/// JSON shape the model must follow.
const EXTRACTION_SHAPE: &str = r#"{
  "institution": "string",
  "department": "string",
  "location": "string",
  "openingPhrase": "string",
  "certificateTitle": "string",
  "preRecipientPhrase": "string",
  "recipientName": "string",
  "purposePhrase": "string",
  "role": "string",
  "eventDetails": "string",
  "datePlace": "string",
  "signatures": [{ "name": "string", "title": "string" }]
}"#;

/// Reject an absent or blank user prompt.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::MissingInput("prompt"));
    }
    Ok(())
}

/// Build the extraction instruction, embedding `user_prompt` verbatim.
pub fn extraction_prompt(user_prompt: &str) -> String {
    format!(
        "{EXTRACTION_RULES}\n\nJSON shape:\n{EXTRACTION_SHAPE}\n\nRequest:\n{user_prompt}"
    )
}

// ---------------------------------------------------------------------------
// Corner-frame image prompt
// ---------------------------------------------------------------------------

/// Intensity wording used when `subtle` is set.
pub const SUBTLE_INTENSITY: &str =
    "subtle and delicate, with fine thin lines and plenty of empty space";

/// Intensity wording used when only `bold` is set.
pub const BOLD_INTENSITY: &str = "bold and striking, with rich ornamentation and strong strokes";

/// Intensity wording used when neither flag is set.
pub const MODERATE_INTENSITY: &str = "moderately detailed and balanced";

/// Phrase used in place of a palette when no colors are given.
const NEUTRAL_PALETTE: &str = "harmonious, muted tones";

/// Visual intensity flags for corner art.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CornerStyle {
    #[serde(default)]
    pub subtle: bool,
    #[serde(default)]
    pub bold: bool,
}

impl CornerStyle {
    /// Intensity phrase for this style. `subtle` is checked first and wins
    /// when both flags are set.
    pub fn intensity(&self) -> &'static str {
        if self.subtle {
            SUBTLE_INTENSITY
        } else if self.bold {
            BOLD_INTENSITY
        } else {
            MODERATE_INTENSITY
        }
    }
}

/// Join color tokens into a comma-separated list.
pub fn palette_phrase(colors: &[String]) -> String {
    let tokens: Vec<&str> = colors
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if tokens.is_empty() {
        NEUTRAL_PALETTE.to_string()
    } else {
        tokens.join(", ")
    }
}

/// Build the image prompt for a decorative certificate corner frame.
pub fn corner_frame_prompt(theme: &str, colors: &[String], style: CornerStyle) -> String {
    format!(
        "Decorative corner ornament for a formal certificate border. \
         Theme: {theme}. \
         Color palette: {palette}. \
         Style: {intensity}. \
         The ornament sits in the top-left corner and fades toward the center, \
         on a plain white background, with no text, letters or numbers.",
        theme = theme.trim(),
        palette = palette_phrase(colors),
        intensity = style.intensity(),
    )
}
