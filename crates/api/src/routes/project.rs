//! Route definitions for `/projects` and its nested resources.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{document, inspection, phases, project, team};
use crate::state::AppState;

/// ```text
/// GET    /                                   list
/// POST   /                                   create
/// GET    /{id}                               get_by_id
/// PUT    /{id}                               update
/// POST   /{id}/status                        change_status
/// GET    /{id}/phases                        phases::list
/// PUT    /{id}/phases/{phase_number}         phases::update
/// GET    /{id}/team                          team::list
/// POST   /{id}/team                          team::add
/// DELETE /{id}/team/{member_id}              team::remove
/// GET    /{id}/inspections                   inspection::list_for_project
/// POST   /{id}/inspections                   inspection::schedule
/// GET    /{id}/documents                     document::list_for_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route("/{id}/status", post(project::change_status))
        .route("/{id}/phases", get(phases::list))
        .route("/{id}/phases/{phase_number}", put(phases::update))
        .route("/{id}/team", get(team::list).post(team::add))
        .route("/{id}/team/{member_id}", delete(team::remove))
        .route(
            "/{id}/inspections",
            get(inspection::list_for_project).post(inspection::schedule),
        )
        .route("/{id}/documents", get(document::list_for_project))
}
