//! Repository for the `certificates` table.
//!
//! Every read takes the caller's user id and filters on it in the same
//! statement as the record id, so a row owned by someone else is
//! indistinguishable from a missing one.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::certificate::{CertificateRecord, CreateCertificate};

/// Column list for `certificates` queries.
const COLUMNS: &str = "id, user_id, title, prompt, size, elements, created_at";

/// Provides data access for certificate records.
pub struct CertificateRepo;

impl CertificateRepo {
    /// Find a certificate by id, only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CertificateRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM certificates WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CertificateRecord>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all certificates owned by `user_id`, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<CertificateRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM certificates WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CertificateRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a certificate owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        dto: &CreateCertificate,
    ) -> Result<CertificateRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO certificates (user_id, title, prompt, size, elements) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CertificateRecord>(&query)
            .bind(user_id)
            .bind(&dto.title)
            .bind(&dto.prompt)
            .bind(&dto.size)
            .bind(&dto.elements)
            .fetch_one(pool)
            .await
    }
}
