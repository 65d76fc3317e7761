//! Handlers for the `/projects` resource.
//!
//! Also hosts the project access checks the nested resources (phases, team,
//! inspections, documents) share:
//!
//! - **view**: superadmins, admin leads and head consultants see every
//!   project; clients see their own client's projects; other staff see
//!   projects they lead or are on the team of.
//! - **manage**: superadmins, or the admin lead who administers the project.
//! - **review** (status moves): superadmins, the administering admin lead,
//!   the project lead, or a head consultant on the team.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use slf_core::error::{CoreError, FieldErrors};
use slf_core::event_types::{EVENT_PROJECT_CREATED, EVENT_PROJECT_STATUS_CHANGED};
use slf_core::project_status::{validate_transition, ProjectStatus, StatusInfo};
use slf_core::roles::{Role, TeamRole, ROLE_HEAD_CONSULTANT, ROLE_PROJECT_LEAD};
use slf_core::types::DbId;
use slf_core::wizard::{validate_edit, NewProjectPlan, ProjectForm};
use slf_db::models::project::{Project, ProjectFilter, UpdateProject};
use slf_db::repositories::{ClientRepo, ProfileRepo, ProjectRepo, TeamRepo};
use slf_db::DbPool;
use slf_events::WorkflowEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireReviewer};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Access helpers
// ---------------------------------------------------------------------------

pub(crate) async fn ensure_project_exists(pool: &DbPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}

/// The caller's client association, for client-side users.
pub(crate) async fn caller_client_id(pool: &DbPool, user: &AuthUser) -> AppResult<Option<DbId>> {
    let profile = ProfileRepo::find_by_id(pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::forbidden("No profile exists for this account"))?;
    Ok(profile.client_id)
}

pub(crate) async fn ensure_can_view(
    pool: &DbPool,
    user: &AuthUser,
    project: &Project,
) -> AppResult<()> {
    let allowed = match user.role {
        Role::Superadmin | Role::AdminLead | Role::HeadConsultant => true,
        Role::Client => {
            let client_id = caller_client_id(pool, user).await?;
            client_id.is_some() && client_id == project.client_id
        }
        Role::ProjectLead | Role::Inspector | Role::Drafter => {
            project.project_lead_id == Some(user.user_id)
                || TeamRepo::is_member(pool, project.id, user.user_id).await?
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden("You do not have access to this project"))
    }
}

pub(crate) fn ensure_can_manage(user: &AuthUser, project: &Project) -> AppResult<()> {
    if user.is_superadmin() || (user.role == Role::AdminLead && project.is_administered_by(user.user_id))
    {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Only the project's admin lead may manage this project",
        ))
    }
}

/// Reviewers must be assigned to the project they act on.
pub(crate) async fn ensure_can_review(
    pool: &DbPool,
    user: &AuthUser,
    project: &Project,
) -> AppResult<()> {
    let allowed = match user.role {
        Role::Superadmin => true,
        Role::AdminLead => project.is_administered_by(user.user_id),
        Role::ProjectLead => {
            project.project_lead_id == Some(user.user_id)
                || TeamRepo::has_role(pool, project.id, user.user_id, ROLE_PROJECT_LEAD).await?
        }
        Role::HeadConsultant => {
            TeamRepo::has_role(pool, project.id, user.user_id, ROLE_HEAD_CONSULTANT).await?
        }
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "You are not assigned to review this project",
        ))
    }
}

/// Field name the wizard uses for each team role.
fn team_field(role: TeamRole) -> &'static str {
    match role {
        TeamRole::ProjectLead => "project_lead_id",
        TeamRole::Inspector => "inspector_ids",
        TeamRole::Drafter => "drafter_id",
        TeamRole::HeadConsultant => "head_consultant_id",
        TeamRole::AdminLead => "admin_lead_id",
    }
}

/// Every planned team member must exist and hold the matching profile role.
pub(crate) async fn verify_team_profiles(pool: &DbPool, plan: &NewProjectPlan) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    for member in &plan.team {
        if member.role == TeamRole::AdminLead {
            continue;
        }
        let field = team_field(member.role);
        let required = member.role.required_profile_role();
        match ProfileRepo::find_by_id(pool, member.user_id).await? {
            None => errors.add(field, format!("Profile {} does not exist", member.user_id)),
            Some(profile) if profile.role != required.as_str() => errors.add(
                field,
                format!(
                    "Profile {} has role '{}', expected '{}'",
                    member.user_id,
                    profile.role,
                    required.as_str()
                ),
            ),
            Some(_) => {}
        }
    }

    if let Some(client_id) = plan.client_id {
        if ClientRepo::find_by_id(pool, client_id).await?.is_none() {
            errors.add("client_id", format!("Client {client_id} does not exist"));
        }
    }

    errors.into_result().map_err(AppError::from)
}

// ---------------------------------------------------------------------------
// Response / query types
// ---------------------------------------------------------------------------

/// A project with its status display metadata.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub status_info: StatusInfo,
}

impl From<Project> for ProjectDetail {
    fn from(project: Project) -> Self {
        let status_info = project.status_info();
        Self {
            project,
            status_info,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<String>,
    /// Only projects the caller leads, administers or is on the team of.
    pub mine: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Lists the projects visible to the caller, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<ProjectDetail>>>> {
    if let Some(status) = params.status.as_deref() {
        ProjectStatus::from_str_db(status)?;
    }

    let mut filter = ProjectFilter {
        status: params.status,
        ..Default::default()
    };

    match auth.role {
        Role::Client => match caller_client_id(&state.pool, &auth).await? {
            Some(client_id) => filter.client_id = Some(client_id),
            None => return Ok(Json(DataResponse { data: Vec::new() })),
        },
        Role::Superadmin | Role::AdminLead | Role::HeadConsultant => {
            if params.mine.unwrap_or(false) {
                filter.member_id = Some(auth.user_id);
            }
        }
        Role::ProjectLead | Role::Inspector | Role::Drafter => {
            filter.member_id = Some(auth.user_id);
        }
    }

    let projects = ProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: projects.into_iter().map(ProjectDetail::from).collect(),
    }))
}

/// POST /api/v1/projects
///
/// Submit the creation wizard. The project, its five phases and its team
/// rows are written in one transaction.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ProjectForm>,
) -> AppResult<impl IntoResponse> {
    let plan = form.into_plan(admin.user_id)?;
    verify_team_profiles(&state.pool, &plan).await?;

    let project = ProjectRepo::create_with_plan(&state.pool, &plan).await?;

    let recipients: Vec<DbId> = plan
        .team
        .iter()
        .map(|m| m.user_id)
        .filter(|id| *id != admin.user_id)
        .collect();

    tracing::info!(
        user_id = admin.user_id,
        project_id = project.id,
        application_type = %project.application_type,
        team_size = plan.team.len(),
        "Project created"
    );

    state.event_bus.publish(
        WorkflowEvent::new(EVENT_PROJECT_CREATED)
            .with_source("project", project.id)
            .with_project(project.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "project_name": project.name,
                "recipient_ids": recipients,
            })),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectDetail::from(project),
        }),
    ))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ensure_project_exists(&state.pool, id).await?;
    ensure_can_view(&state.pool, &auth, &project).await?;
    Ok(Json(DataResponse {
        data: project.into(),
    }))
}

/// PUT /api/v1/projects/{id}
///
/// Edit project details. Status moves go through `/status`.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ensure_project_exists(&state.pool, id).await?;
    ensure_can_manage(&admin, &project)?;

    validate_edit(
        input.name.as_deref(),
        input.location.as_deref(),
        input.priority.as_deref(),
    )
    .into_result()?;

    let updated = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;

    tracing::info!(user_id = admin.user_id, project_id = id, "Project updated");

    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}

/// POST /api/v1/projects/{id}/status
///
/// Move the project one step along its lifecycle (or cancel it). The write
/// only succeeds if nobody else moved the project first.
pub async fn change_status(
    RequireReviewer(reviewer): RequireReviewer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusChangeRequest>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ensure_project_exists(&state.pool, id).await?;
    ensure_can_review(&state.pool, &reviewer, &project).await?;

    let current = ProjectStatus::from_str_db(&project.status)
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    let next = ProjectStatus::from_str_db(&input.status)?;
    validate_transition(current, next)?;

    let updated = ProjectRepo::update_status_if(&state.pool, id, current.as_str(), next.as_str())
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Project {id} is no longer in status '{}'",
                current.as_str()
            ))
        })?;

    tracing::info!(
        user_id = reviewer.user_id,
        project_id = id,
        from = current.as_str(),
        to = next.as_str(),
        "Project status changed"
    );

    state.event_bus.publish(
        WorkflowEvent::new(EVENT_PROJECT_STATUS_CHANGED)
            .with_source("project", id)
            .with_project(id)
            .with_actor(reviewer.user_id)
            .with_payload(serde_json::json!({
                "project_name": updated.name,
                "from": current.as_str(),
                "to": next.as_str(),
            })),
    );

    Ok(Json(DataResponse {
        data: updated.into(),
    }))
}
