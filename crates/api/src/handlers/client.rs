//! Handlers for the `/clients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use slf_core::error::FieldErrors;
use slf_core::roles::Role;
use slf_core::types::DbId;
use slf_db::models::client::{Client, CreateClient};
use slf_db::repositories::ClientRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::project::caller_client_id;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/clients
///
/// Superadmins see every client; admin leads see the clients they created
/// or administer a project for.
pub async fn list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let clients = if admin.is_superadmin() {
        ClientRepo::list(&state.pool).await?
    } else {
        ClientRepo::list_for_admin(&state.pool, admin.user_id).await?
    };
    Ok(Json(DataResponse { data: clients }))
}

/// POST /api/v1/clients
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();
    if input.name.trim().is_empty() {
        errors.add("name", "Client name is required");
    }
    if matches!(input.email.as_deref(), Some(email) if !email.contains('@')) {
        errors.add("email", "Email address is not valid");
    }
    errors.into_result()?;

    let client = ClientRepo::create(&state.pool, admin.user_id, &input).await?;

    tracing::info!(user_id = admin.user_id, client_id = client.id, "Client created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients/{id}
///
/// Client-side users may read their own client record.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Client", id))?;

    let allowed = match auth.role {
        Role::Superadmin => true,
        Role::AdminLead => ClientRepo::ids_for_admin(&state.pool, auth.user_id)
            .await?
            .contains(&id),
        Role::Client => caller_client_id(&state.pool, &auth).await? == Some(id),
        _ => false,
    };
    if !allowed {
        return Err(AppError::forbidden("You do not have access to this client"));
    }

    Ok(Json(DataResponse { data: client }))
}
