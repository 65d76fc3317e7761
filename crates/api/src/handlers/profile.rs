//! Handlers for the `/profiles` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use slf_core::roles::Role;
use slf_db::models::profile::Profile;
use slf_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub role: Option<String>,
}

/// GET /api/v1/profiles?role=
///
/// Used by the wizard and team screens to pick members of a given role.
pub async fn list(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let role = params.role.as_deref().map(Role::from_str_db).transpose()?;
    let profiles = ProfileRepo::list(&state.pool, role.map(Role::as_str)).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// GET /api/v1/profiles/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", auth.user_id))?;
    Ok(Json(DataResponse { data: profile }))
}
