//! Pending-document triage: listing unlinked uploads and attaching them to
//! new or existing projects.

use std::collections::BTreeMap;

use slf_core::event_types::NOTIFICATION_DOCUMENTS_LINKED;
use slf_core::types::DbId;
use slf_core::wizard::NewProjectPlan;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::document::{Document, PendingDocument, TriageOutcome};
use crate::models::notification::CreateNotification;
use crate::models::project::Project;
use crate::repositories::document_repo::COLUMNS as DOCUMENT_COLUMNS;
use crate::repositories::project_repo::COLUMNS as PROJECT_COLUMNS;
use crate::repositories::{NotificationRepo, ProjectRepo};

const PENDING_SELECT: &str = "SELECT d.id, d.created_by, d.document_type, d.name, d.status, \
            d.metadata, d.url, d.created_at, \
            p.full_name AS uploader_name, p.client_id AS uploader_client_id \
     FROM documents d \
     JOIN profiles p ON p.id = d.created_by \
     WHERE d.project_id IS NULL";

pub struct TriageRepo;

impl TriageRepo {
    /// Unlinked documents uploaded by members of the given clients.
    pub async fn list_pending_for_clients(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<PendingDocument>, sqlx::Error> {
        let query = format!(
            "{PENDING_SELECT} AND p.client_id = ANY($1) ORDER BY d.created_at DESC, d.id DESC"
        );
        sqlx::query_as::<_, PendingDocument>(&query)
            .bind(client_ids)
            .fetch_all(pool)
            .await
    }

    /// Every unlinked document, including uploads from profiles without a client.
    pub async fn list_all_pending(pool: &PgPool) -> Result<Vec<PendingDocument>, sqlx::Error> {
        let query = format!("{PENDING_SELECT} ORDER BY d.created_at DESC, d.id DESC");
        sqlx::query_as::<_, PendingDocument>(&query)
            .fetch_all(pool)
            .await
    }

    /// Create a project from `plan` and attach the documents to it.
    ///
    /// Returns `None`, with nothing written, if any document is missing or
    /// already linked.
    pub async fn create_project_from_documents(
        pool: &PgPool,
        plan: &NewProjectPlan,
        document_ids: &[DbId],
    ) -> Result<Option<TriageOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let project = ProjectRepo::insert_plan(&mut tx, plan).await?;

        let outcome = Self::link_inner(&mut tx, project, document_ids, plan.created_by).await?;
        if outcome.is_some() {
            tx.commit().await?;
        }
        Ok(outcome)
    }

    /// Attach documents to an existing project.
    ///
    /// Returns `None`, with nothing written, if the project or any document
    /// is missing, or a document is already linked.
    pub async fn link_documents(
        pool: &PgPool,
        project_id: DbId,
        document_ids: &[DbId],
        actor_id: DbId,
    ) -> Result<Option<TriageOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let Some(project) = sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let outcome = Self::link_inner(&mut tx, project, document_ids, actor_id).await?;
        if outcome.is_some() {
            tx.commit().await?;
        }
        Ok(outcome)
    }

    async fn link_inner(
        tx: &mut Transaction<'_, Postgres>,
        project: Project,
        document_ids: &[DbId],
        actor_id: DbId,
    ) -> Result<Option<TriageOutcome>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET project_id = $1 \
             WHERE id = ANY($2) AND project_id IS NULL \
             RETURNING {DOCUMENT_COLUMNS}"
        );
        let mut documents = sqlx::query_as::<_, Document>(&query)
            .bind(project.id)
            .bind(document_ids)
            .fetch_all(&mut **tx)
            .await?;

        if documents.len() != document_ids.len() {
            tracing::debug!(
                project_id = project.id,
                requested = document_ids.len(),
                linked = documents.len(),
                "Triage selection no longer available, rolling back"
            );
            return Ok(None);
        }
        documents.sort_by_key(|d| d.id);

        let mut per_uploader: BTreeMap<DbId, usize> = BTreeMap::new();
        for doc in &documents {
            *per_uploader.entry(doc.created_by).or_default() += 1;
        }

        for (&uploader, &count) in &per_uploader {
            let notification = CreateNotification {
                recipient_id: uploader,
                sender_id: Some(actor_id),
                notification_type: NOTIFICATION_DOCUMENTS_LINKED.to_string(),
                message: format!(
                    "{count} of your documents were linked to project \"{}\"",
                    project.name
                ),
                project_id: Some(project.id),
            };
            NotificationRepo::insert_inner(tx, &notification).await?;
        }

        Ok(Some(TriageOutcome {
            project,
            documents,
            notified_user_ids: per_uploader.into_keys().collect(),
        }))
    }
}
