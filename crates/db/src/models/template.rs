use certgen_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: Timestamp,
}

/// Fields for inserting a template.
///
/// Records are saved by the editor, not through this service; inserts
/// exist to seed fixtures.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub name: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
}
