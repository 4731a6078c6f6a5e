//! Repository for the `templates` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::template::{CreateTemplate, Template};

/// Column list for `templates` queries.
const COLUMNS: &str = "id, name, description, file_url, thumbnail_url, user_id, created_at";

/// Provides data access for template metadata.
pub struct TemplateRepo;

impl TemplateRepo {
    /// List all templates owned by `user_id`, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Template>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM templates WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Template>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a template owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        dto: &CreateTemplate,
    ) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO templates (name, description, file_url, thumbnail_url, user_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.file_url)
            .bind(&dto.thumbnail_url)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
