//! Certificate records saved by the client-side editor.

use certgen_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `certificates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CertificateRecord {
    pub id: Uuid,
    /// Owning user (identity-service user id).
    pub user_id: Uuid,
    pub title: String,
    /// The free-text prompt the certificate was generated from.
    pub prompt: Option<String>,
    /// Layout size token chosen in the editor (e.g. `landscape`).
    pub size: String,
    /// Rendered layout, opaque to the server.
    pub elements: serde_json::Value,
    pub created_at: Timestamp,
}

/// Fields for inserting a certificate record.
///
/// Records are saved by the editor, not through this service; inserts
/// exist to seed fixtures.
#[derive(Debug, Clone)]
pub struct CreateCertificate {
    pub title: String,
    pub prompt: Option<String>,
    pub size: String,
    pub elements: serde_json::Value,
}
