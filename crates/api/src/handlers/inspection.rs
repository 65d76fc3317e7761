//! Handlers for inspections, their checklist answers, and evidence photos.
//!
//! Scheduling is done by whoever runs the project (superadmin, the
//! administering admin lead, or the project lead). Only the assigned
//! inspector records answers and photos, and only while the inspection is
//! in progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use slf_core::error::{CoreError, FieldErrors};
use slf_core::event_types::{EVENT_INSPECTION_SCHEDULED, EVENT_INSPECTION_STATUS_CHANGED};
use slf_core::evidence::{validate_optional_coordinates, validate_photogeotag};
use slf_core::inspection::{validate_time_window, validate_transition, InspectionStatus};
use slf_core::roles::{Role, ROLE_INSPECTOR};
use slf_core::types::DbId;
use slf_db::models::inspection::{
    ChecklistResponse, CreateInspection, CreateInspectionPhoto, Inspection, InspectionPhoto,
    UpsertChecklistResponse,
};
use slf_db::models::project::Project;
use slf_db::repositories::{ChecklistRepo, InspectionRepo, PhotoRepo, TeamRepo};
use slf_db::DbPool;
use slf_events::WorkflowEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_can_view, ensure_project_exists};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_inspection_exists(pool: &DbPool, id: DbId) -> AppResult<Inspection> {
    InspectionRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Inspection", id))
}

fn can_schedule(user: &AuthUser, project: &Project) -> bool {
    match user.role {
        Role::Superadmin => true,
        Role::AdminLead => project.is_administered_by(user.user_id),
        Role::ProjectLead => project.project_lead_id == Some(user.user_id),
        _ => false,
    }
}

fn ensure_assigned_inspector(user: &AuthUser, inspection: &Inspection) -> AppResult<()> {
    if user.is_superadmin() || inspection.inspector_id == user.user_id {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Only the assigned inspector may record evidence",
        ))
    }
}

fn ensure_accepts_evidence(inspection: &Inspection) -> AppResult<()> {
    let status = InspectionStatus::from_str_db(&inspection.status)
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    if status.accepts_evidence() {
        Ok(())
    } else {
        Err(AppError::conflict(format!(
            "Inspection {} is '{}'; evidence is only accepted while in progress",
            inspection.id,
            status.as_str()
        )))
    }
}

// ---------------------------------------------------------------------------
// Inspections
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/inspections
pub async fn list_for_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Inspection>>>> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let inspections = InspectionRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: inspections }))
}

/// POST /api/v1/projects/{id}/inspections
pub async fn schedule(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateInspection>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    if !can_schedule(&auth, &project) {
        return Err(AppError::forbidden(
            "Only the project's admin lead or project lead may schedule inspections",
        ));
    }

    validate_time_window(input.start_time, input.end_time)?;

    if !TeamRepo::has_role(&state.pool, project_id, input.inspector_id, ROLE_INSPECTOR).await? {
        let mut errors = FieldErrors::new();
        errors.add(
            "inspector_id",
            format!(
                "Profile {} is not an inspector on project {project_id}",
                input.inspector_id
            ),
        );
        return Err(CoreError::InvalidFields(errors).into());
    }

    let inspection = InspectionRepo::create(&state.pool, project_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id,
        inspection_id = inspection.id,
        inspector_id = inspection.inspector_id,
        scheduled_date = %inspection.scheduled_date,
        "Inspection scheduled"
    );

    state.event_bus.publish(
        WorkflowEvent::new(EVENT_INSPECTION_SCHEDULED)
            .with_source("inspection", inspection.id)
            .with_project(project_id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "project_name": project.name,
                "scheduled_date": inspection.scheduled_date,
                "recipient_ids": [inspection.inspector_id],
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: inspection })))
}

/// GET /api/v1/inspections/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Inspection>>> {
    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    let project = ensure_project_exists(&state.pool, inspection.project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;
    Ok(Json(DataResponse { data: inspection }))
}

#[derive(Debug, Deserialize)]
pub struct InspectionStatusRequest {
    pub status: String,
}

/// POST /api/v1/inspections/{id}/status
///
/// The assigned inspector starts and completes the visit. Only the
/// scheduler may cancel or reject it.
pub async fn change_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<InspectionStatusRequest>,
) -> AppResult<Json<DataResponse<Inspection>>> {
    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    let project = ensure_project_exists(&state.pool, inspection.project_id).await?;

    if inspection.inspector_id != auth.user_id && !can_schedule(&auth, &project) {
        return Err(AppError::forbidden(
            "You are not assigned to this inspection",
        ));
    }

    let current = InspectionStatus::from_str_db(&inspection.status)
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    let next = InspectionStatus::from_str_db(&input.status)?;
    if matches!(next, InspectionStatus::Cancelled | InspectionStatus::Rejected)
        && !can_schedule(&auth, &project)
    {
        return Err(AppError::forbidden(format!(
            "Only the project's scheduler may mark an inspection {}",
            next.as_str()
        )));
    }
    validate_transition(current, next)?;

    let updated = InspectionRepo::update_status_if(&state.pool, id, current.as_str(), next.as_str())
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Inspection {id} is no longer in status '{}'",
                current.as_str()
            ))
        })?;

    tracing::info!(
        user_id = auth.user_id,
        inspection_id = id,
        project_id = project.id,
        from = current.as_str(),
        to = next.as_str(),
        "Inspection status changed"
    );

    state.event_bus.publish(
        WorkflowEvent::new(EVENT_INSPECTION_STATUS_CHANGED)
            .with_source("inspection", id)
            .with_project(project.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "project_name": project.name,
                "from": current.as_str(),
                "to": next.as_str(),
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Checklist responses
// ---------------------------------------------------------------------------

/// GET /api/v1/inspections/{id}/responses
pub async fn list_responses(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChecklistResponse>>>> {
    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    let project = ensure_project_exists(&state.pool, inspection.project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let responses = ChecklistRepo::list_by_inspection(&state.pool, id).await?;
    Ok(Json(DataResponse { data: responses }))
}

/// PUT /api/v1/inspections/{id}/responses/{item_id}
///
/// Answer (or re-answer) one checklist item.
pub async fn upsert_response(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, item_id)): Path<(DbId, String)>,
    Json(input): Json<UpsertChecklistResponse>,
) -> AppResult<Json<DataResponse<ChecklistResponse>>> {
    let item_id = item_id.trim();
    if item_id.is_empty() {
        return Err(AppError::BadRequest("item_id must not be empty".into()));
    }

    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    ensure_assigned_inspector(&auth, &inspection)?;
    ensure_accepts_evidence(&inspection)?;

    if let Some(geotag) = &input.photogeotag_data {
        validate_photogeotag(geotag)?;
    }

    let response = ChecklistRepo::upsert(&state.pool, id, item_id, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        inspection_id = id,
        item_id,
        geotagged = input.photogeotag_data.is_some(),
        "Checklist response recorded"
    );

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// GET /api/v1/inspections/{id}/photos
pub async fn list_photos(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<InspectionPhoto>>>> {
    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    let project = ensure_project_exists(&state.pool, inspection.project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let photos = PhotoRepo::list_by_inspection(&state.pool, id).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// POST /api/v1/inspections/{id}/photos
pub async fn add_photo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateInspectionPhoto>,
) -> AppResult<impl IntoResponse> {
    if input.photo_url.trim().is_empty() {
        return Err(AppError::BadRequest("photo_url is required".into()));
    }
    validate_optional_coordinates(input.latitude, input.longitude)?;

    let inspection = ensure_inspection_exists(&state.pool, id).await?;
    ensure_assigned_inspector(&auth, &inspection)?;
    ensure_accepts_evidence(&inspection)?;

    let photo = PhotoRepo::create(&state.pool, id, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        inspection_id = id,
        photo_id = photo.id,
        "Inspection photo added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}
