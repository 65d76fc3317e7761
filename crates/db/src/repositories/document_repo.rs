//! Repository for the `documents` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{CreateDocument, Document};

pub(crate) const COLUMNS: &str = "id, project_id, created_by, document_type, name, status, \
     metadata, url, created_at, updated_at";

pub struct DocumentRepo;

impl DocumentRepo {
    /// Register an uploaded document. New documents start as `draft`.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (project_id, created_by, document_type, name, metadata, url) \
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb), $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.project_id)
            .bind(created_by)
            .bind(&input.document_type)
            .bind(&input.name)
            .bind(&input.metadata)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every document in `ids` that exists, in id order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Document>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE project_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-set the review status.
    ///
    /// Returns `None` when the document is missing or no longer in `expected`.
    pub async fn update_status_if(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET status = $3 \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .fetch_optional(pool)
            .await
    }
}
