//! Handlers for `/triage`: reviewing unlinked uploads and attaching them to
//! projects.
//!
//! Admin leads only see uploads from clients they are associated with;
//! superadmins also see uploads from profiles with no client.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slf_core::event_types::{EVENT_DOCUMENTS_LINKED, EVENT_PROJECT_CREATED};
use slf_core::triage::{
    common_client, group_by_client, resolve_client, triage_plan, validate_selection, ClientGroup,
    ProjectPrefill, TriageProjectFields,
};
use slf_core::types::DbId;
use slf_db::models::document::{Document, PendingDocument, TriageOutcome};
use slf_db::repositories::{ClientRepo, DocumentRepo, TriageRepo};
use slf_db::DbPool;
use slf_events::WorkflowEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_can_manage, ensure_project_exists, verify_team_profiles};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pending documents the admin may act on.
async fn visible_pending(pool: &DbPool, admin: &AuthUser) -> AppResult<Vec<PendingDocument>> {
    if admin.is_superadmin() {
        return Ok(TriageRepo::list_all_pending(pool).await?);
    }
    let client_ids = ClientRepo::ids_for_admin(pool, admin.user_id).await?;
    if client_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(TriageRepo::list_pending_for_clients(pool, &client_ids).await?)
}

/// A validated batch of pending documents.
struct Selection {
    documents: Vec<Document>,
    /// Client of the uploaders, shared by the whole batch.
    client_id: Option<DbId>,
}

/// Load the selected documents in request order, checking that each exists,
/// is still unlinked, is visible to the admin, and that all of them come
/// from the same client.
async fn load_selection(
    pool: &DbPool,
    admin: &AuthUser,
    document_ids: &[DbId],
) -> AppResult<Selection> {
    validate_selection(document_ids)?;

    let mut by_id: HashMap<DbId, Document> = DocumentRepo::find_by_ids(pool, document_ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    let mut documents = Vec::with_capacity(document_ids.len());
    for id in document_ids {
        let document = by_id
            .remove(id)
            .ok_or_else(|| AppError::not_found("Document", *id))?;
        if let Some(project_id) = document.project_id {
            return Err(AppError::conflict(format!(
                "Document {id} is already linked to project {project_id}"
            )));
        }
        documents.push(document);
    }

    let visible: HashMap<DbId, Option<DbId>> = visible_pending(pool, admin)
        .await?
        .into_iter()
        .map(|d| (d.id, d.uploader_client_id))
        .collect();

    let mut uploader_clients = Vec::with_capacity(documents.len());
    for document in &documents {
        let Some(client_id) = visible.get(&document.id) else {
            return Err(AppError::forbidden(format!(
                "Document {} belongs to a client you do not manage",
                document.id
            )));
        };
        uploader_clients.push(*client_id);
    }
    let client_id = common_client(uploader_clients)?;

    Ok(Selection {
        documents,
        client_id,
    })
}

fn publish_linked(state: &AppState, admin: &AuthUser, outcome: &TriageOutcome) {
    let document_ids: Vec<DbId> = outcome.documents.iter().map(|d| d.id).collect();
    state.event_bus.publish(
        WorkflowEvent::new(EVENT_DOCUMENTS_LINKED)
            .with_source("project", outcome.project.id)
            .with_project(outcome.project.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "document_ids": document_ids,
                "notified_user_ids": outcome.notified_user_ids,
            })),
    );
}

/// GET /api/v1/triage/pending
///
/// Pending documents grouped by the uploader's client; the `unknown` group
/// comes last.
pub async fn list_pending(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ClientGroup<PendingDocument>>>>> {
    let pending = visible_pending(&state.pool, &admin).await?;
    let groups = group_by_client(pending, |d| d.uploader_client_id);
    Ok(Json(DataResponse { data: groups }))
}

#[derive(Debug, Deserialize)]
pub struct NewProjectFromDocuments {
    pub document_ids: Vec<DbId>,
    #[serde(default)]
    pub project: TriageProjectFields,
}

/// POST /api/v1/triage/new-project
///
/// Create a project from pending documents. Missing project details are
/// taken from the first selected document's building info, and the client
/// defaults to the uploaders' client.
pub async fn create_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewProjectFromDocuments>,
) -> AppResult<impl IntoResponse> {
    let selection = load_selection(&state.pool, &admin, &input.document_ids).await?;
    let prefill = selection
        .documents
        .first()
        .map(|d| ProjectPrefill::from_metadata(&d.metadata))
        .unwrap_or_default();

    let mut fields = input.project;
    fields.client_id = resolve_client(fields.client_id, selection.client_id)?;

    let plan = triage_plan(fields, prefill, admin.user_id)?;
    verify_team_profiles(&state.pool, &plan).await?;

    let outcome =
        TriageRepo::create_project_from_documents(&state.pool, &plan, &input.document_ids)
            .await?
            .ok_or_else(|| {
                AppError::conflict("Some selected documents were linked by someone else")
            })?;

    tracing::info!(
        user_id = admin.user_id,
        project_id = outcome.project.id,
        documents = outcome.documents.len(),
        notified = outcome.notified_user_ids.len(),
        "Project created from pending documents"
    );

    let recipients: Vec<DbId> = plan
        .team
        .iter()
        .map(|m| m.user_id)
        .filter(|id| *id != admin.user_id)
        .collect();
    state.event_bus.publish(
        WorkflowEvent::new(EVENT_PROJECT_CREATED)
            .with_source("project", outcome.project.id)
            .with_project(outcome.project.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "project_name": outcome.project.name,
                "recipient_ids": recipients,
            })),
    );
    publish_linked(&state, &admin, &outcome);

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

#[derive(Debug, Deserialize)]
pub struct LinkDocuments {
    pub project_id: DbId,
    pub document_ids: Vec<DbId>,
}

/// POST /api/v1/triage/link
///
/// Attach pending documents to a project the admin administers. The
/// project must belong to the uploaders' client. All of the documents are
/// linked, or none are.
pub async fn link_to_project(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<LinkDocuments>,
) -> AppResult<Json<DataResponse<TriageOutcome>>> {
    let project = ensure_project_exists(&state.pool, input.project_id).await?;
    ensure_can_manage(&admin, &project)?;
    let selection = load_selection(&state.pool, &admin, &input.document_ids).await?;
    if let Some(owner) = selection.client_id {
        if project.client_id != Some(owner) {
            return Err(AppError::conflict(format!(
                "Selected documents belong to client {owner}, which does not own project {}",
                project.id
            )));
        }
    }

    let outcome = TriageRepo::link_documents(
        &state.pool,
        input.project_id,
        &input.document_ids,
        admin.user_id,
    )
    .await?
    .ok_or_else(|| AppError::conflict("Some selected documents were linked by someone else"))?;

    tracing::info!(
        user_id = admin.user_id,
        project_id = input.project_id,
        documents = outcome.documents.len(),
        notified = outcome.notified_user_ids.len(),
        "Pending documents linked to project"
    );

    publish_linked(&state, &admin, &outcome);

    Ok(Json(DataResponse { data: outcome }))
}
