//! Handlers for `/projects/{id}/team`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use slf_core::error::FieldErrors;
use slf_core::event_types::EVENT_TEAM_MEMBER_ADDED;
use slf_core::roles::TeamRole;
use slf_core::types::DbId;
use slf_db::models::team::{CreateTeamMember, TeamMemberWithProfile};
use slf_db::repositories::{ProfileRepo, TeamRepo};
use slf_events::WorkflowEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{ensure_can_manage, ensure_can_view, ensure_project_exists};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/team
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TeamMemberWithProfile>>>> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;

    let members = TeamRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/projects/{id}/team
///
/// The member's profile role must match the team role. Adding a project
/// lead replaces the previous lead.
pub async fn add(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_manage(&admin, &project)?;

    let role = TeamRole::from_str_db(&input.role)?;
    let required = role.required_profile_role();

    let mut errors = FieldErrors::new();
    match ProfileRepo::find_by_id(&state.pool, input.user_id).await? {
        None => errors.add("user_id", format!("Profile {} does not exist", input.user_id)),
        Some(profile) if profile.role != required.as_str() => errors.add(
            "user_id",
            format!(
                "Profile {} has role '{}' and cannot join as '{}'",
                input.user_id,
                profile.role,
                role.as_str()
            ),
        ),
        Some(_) => {}
    }
    errors.into_result()?;

    let member = TeamRepo::add(&state.pool, project_id, &input, admin.user_id).await?;

    tracing::info!(
        user_id = admin.user_id,
        project_id,
        member_user_id = member.user_id,
        role = role.as_str(),
        "Team member added"
    );

    state.event_bus.publish(
        WorkflowEvent::new(EVENT_TEAM_MEMBER_ADDED)
            .with_source("project_team", member.id)
            .with_project(project_id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "project_name": project.name,
                "role": role.as_str(),
                "recipient_ids": [member.user_id],
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// DELETE /api/v1/projects/{id}/team/{member_id}
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = ensure_project_exists(&state.pool, project_id).await?;
    ensure_can_manage(&admin, &project)?;

    if !TeamRepo::remove(&state.pool, project_id, member_id).await? {
        return Err(AppError::not_found("TeamMember", member_id));
    }

    tracing::info!(
        user_id = admin.user_id,
        project_id,
        member_id,
        "Team member removed"
    );

    Ok(StatusCode::NO_CONTENT)
}
