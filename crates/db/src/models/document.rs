//! Document model and DTOs.

use serde::{Deserialize, Serialize};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub created_by: DbId,
    pub document_type: String,
    pub name: String,
    pub status: String,
    pub metadata: serde_json::Value,
    pub url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An unlinked document together with its uploader's client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingDocument {
    pub id: DbId,
    pub created_by: DbId,
    pub document_type: String,
    pub name: String,
    pub status: String,
    pub metadata: serde_json::Value,
    pub url: Option<String>,
    pub created_at: Timestamp,
    pub uploader_name: String,
    pub uploader_client_id: Option<DbId>,
}

/// DTO for registering an uploaded document. The file itself lives at `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub project_id: Option<DbId>,
    pub document_type: String,
    pub name: String,
    pub metadata: Option<serde_json::Value>,
    pub url: Option<String>,
}

/// Result of attaching pending documents to a project.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub project: crate::models::project::Project,
    pub documents: Vec<Document>,
    /// Uploaders that received a `documents_linked` notification.
    pub notified_user_ids: Vec<DbId>,
}
