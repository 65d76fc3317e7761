//! Handlers for documents and their review actions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slf_core::document::{DocumentAction, DocumentStatus, DocumentType};
use slf_core::error::{CoreError, FieldErrors};
use slf_core::event_types::EVENT_DOCUMENT_REVIEWED;
use slf_core::types::DbId;
use slf_db::models::document::{CreateDocument, Document};
use slf_db::repositories::DocumentRepo;
use slf_db::DbPool;
use slf_events::WorkflowEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_can_review, ensure_can_view, ensure_project_exists};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_document_exists(pool: &DbPool, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Document", id))
}

/// Linked documents follow their project's visibility. Pending documents
/// are visible to their uploader and to admins.
async fn ensure_can_see_document(
    pool: &DbPool,
    user: &AuthUser,
    document: &Document,
) -> AppResult<()> {
    match document.project_id {
        Some(project_id) => {
            let project = ensure_project_exists(pool, project_id).await?;
            ensure_can_view(pool, user, &project).await
        }
        None if document.created_by == user.user_id || user.is_admin() => Ok(()),
        None => Err(AppError::forbidden("You do not have access to this document")),
    }
}

/// POST /api/v1/documents
///
/// Register an uploaded document. Without `project_id` it waits in triage.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();
    if input.name.trim().is_empty() {
        errors.add("name", "Document name is required");
    }
    if let Err(e) = DocumentType::from_str_db(&input.document_type) {
        errors.add("document_type", e.to_string());
    }
    if matches!(&input.metadata, Some(m) if !m.is_object()) {
        errors.add("metadata", "metadata must be a JSON object");
    }
    errors.into_result()?;

    if let Some(project_id) = input.project_id {
        let project = ensure_project_exists(&state.pool, project_id).await?;
        ensure_can_view(&state.pool, &auth, &project).await?;
    }

    let document = DocumentRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        document_id = document.id,
        project_id = ?document.project_id,
        document_type = %document.document_type,
        "Document registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Document>>> {
    let document = ensure_document_exists(&state.pool, id).await?;
    ensure_can_see_document(&state.pool, &auth, &document).await?;
    Ok(Json(DataResponse { data: document }))
}

/// GET /api/v1/projects/{id}/documents
pub async fn list_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let documents = DocumentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: documents }))
}

#[derive(Debug, Deserialize)]
pub struct DocumentActionRequest {
    pub action: DocumentAction,
}

/// POST /api/v1/documents/{id}/actions
///
/// Take a review action. The caller's role must permit the action and the
/// document must be in one of the action's source statuses. On a linked
/// document, reviewers must also be assigned to its project.
pub async fn take_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DocumentActionRequest>,
) -> AppResult<Json<DataResponse<Document>>> {
    let document = ensure_document_exists(&state.pool, id).await?;
    ensure_can_see_document(&state.pool, &auth, &document).await?;

    if input.action == DocumentAction::Submit
        && document.created_by != auth.user_id
        && !auth.is_admin()
    {
        return Err(AppError::forbidden(
            "Only the uploader may submit this document",
        ));
    }

    if input.action != DocumentAction::Submit {
        if let Some(project_id) = document.project_id {
            let project = ensure_project_exists(&state.pool, project_id).await?;
            ensure_can_review(&state.pool, &auth, &project).await?;
        }
    }

    let current = DocumentStatus::from_str_db(&document.status)
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    let next = input.action.apply(current, auth.role)?;

    let updated = DocumentRepo::update_status_if(&state.pool, id, current.as_str(), next.as_str())
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Document {id} is no longer in status '{}'",
                current.as_str()
            ))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        document_id = id,
        action = input.action.as_str(),
        from = current.as_str(),
        to = next.as_str(),
        "Document review action taken"
    );

    let mut event = WorkflowEvent::new(EVENT_DOCUMENT_REVIEWED)
        .with_source("document", id)
        .with_actor(auth.user_id)
        .with_payload(serde_json::json!({
            "document_name": updated.name,
            "action": input.action.as_str(),
            "from": current.as_str(),
            "to": next.as_str(),
            "uploaded_by": updated.created_by,
        }));
    if let Some(project_id) = updated.project_id {
        event = event.with_project(project_id);
    }
    state.event_bus.publish(event);

    Ok(Json(DataResponse { data: updated }))
}
