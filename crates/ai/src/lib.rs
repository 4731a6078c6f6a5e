//! Gateways to the hosted AI providers.
//!
//! - [`provider`] -- the [`LanguageModel`](provider::LanguageModel) and
//!   [`ImageModel`](provider::ImageModel) seams plus their shared error type.
//! - [`openai`] -- an OpenAI-compatible HTTP client implementing both seams.
//! - [`extraction`] -- free text to [`CertificateFields`](certgen_core::certificate::CertificateFields).
//! - [`image`] -- corner-art and generic image generation.

pub mod extraction;
pub mod image;
pub mod openai;
pub mod provider;
