//! Response envelope types for API handlers.
//!
//! List endpoints use the `{ "data": ... }` envelope. The single-record
//! fetch and the image endpoints keep the shapes their clients expect.

use certgen_db::models::certificate::CertificateRecord;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "certificate": ... }` returned by the authenticated fetch.
#[derive(Debug, Serialize)]
pub struct CertificateResponse {
    pub certificate: CertificateRecord,
}

/// `{ "url": ... }` returned by image generation. An empty string means
/// the provider produced no image.
#[derive(Debug, Serialize)]
pub struct ImageUrlResponse {
    pub url: String,
}
