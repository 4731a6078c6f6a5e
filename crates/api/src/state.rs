use std::sync::Arc;

use certgen_ai::extraction::ExtractionGateway;
use certgen_ai::image::ImageGateway;

use crate::records::RecordAccessGateway;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Every gateway is built once at startup from
/// [`ServerConfig`](crate::config::ServerConfig) and injected
/// here; tests build the same struct around fake providers.
#[derive(Clone)]
pub struct AppState {
    /// Free text to certificate fields.
    pub extraction: Arc<ExtractionGateway>,
    /// Corner art and generic image generation.
    pub images: Arc<ImageGateway>,
    /// Caller authentication and owner-scoped reads.
    pub records: Arc<RecordAccessGateway>,
}
