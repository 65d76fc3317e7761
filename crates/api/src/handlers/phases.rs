//! Handlers for `/projects/{id}/phases`.

use axum::extract::{Path, State};
use axum::Json;
use slf_core::error::FieldErrors;
use slf_core::phases::{Phase, PhaseStatus, MAX_PHASE_DAYS, MIN_PHASE_DAYS};
use slf_core::types::DbId;
use slf_db::models::phase::{ProjectPhase, UpdatePhase};
use slf_db::repositories::PhaseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_can_manage, ensure_can_view, ensure_project_exists};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/phases
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProjectPhase>>>> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let phases = PhaseRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: phases }))
}

/// PUT /api/v1/projects/{id}/phases/{phase_number}
///
/// Adjust a phase's estimated duration or mark its progress.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((project_id, phase_number)): Path<(DbId, i16)>,
    Json(input): Json<UpdatePhase>,
) -> AppResult<Json<DataResponse<ProjectPhase>>> {
    let phase = Phase::from_number(phase_number)?;
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_manage(&admin, &project)?;

    let mut errors = FieldErrors::new();
    if let Some(days) = input.estimated_duration {
        if !(MIN_PHASE_DAYS..=MAX_PHASE_DAYS).contains(&days) {
            errors.add(
                "estimated_duration",
                format!(
                    "{} duration must be between {MIN_PHASE_DAYS} and {MAX_PHASE_DAYS} days",
                    phase.name()
                ),
            );
        }
    }
    if let Some(status) = input.status.as_deref() {
        if let Err(e) = PhaseStatus::from_str_db(status) {
            errors.add("status", e.to_string());
        }
    }
    errors.into_result()?;

    let updated = PhaseRepo::update(&state.pool, project_id, phase_number, phase.key(), &input)
        .await?
        .ok_or_else(|| AppError::not_found("ProjectPhase", phase_number.into()))?;

    tracing::info!(
        user_id = admin.user_id,
        project_id,
        phase_number,
        estimated_duration = updated.estimated_duration,
        status = %updated.status,
        "Project phase updated"
    );

    Ok(Json(DataResponse { data: updated }))
}
