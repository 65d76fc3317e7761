//! Public lookup routes. No authentication required.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Status vocabularies, merged into `/statuses`.
///
/// ```text
/// GET    /projects                  list_project_statuses
/// GET    /projects/{status}         get_project_status
/// GET    /documents                 list_document_statuses
/// GET    /documents/{status}        get_document_status
/// ```
pub fn statuses_router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(lookups::list_project_statuses))
        .route("/projects/{status}", get(lookups::get_project_status))
        .route("/documents", get(lookups::list_document_statuses))
        .route("/documents/{status}", get(lookups::get_document_status))
}

/// Team-leader transition table, merged into `/workflow`.
///
/// ```text
/// GET    /next-allowed/{status}     next_allowed
/// ```
pub fn workflow_router() -> Router<AppState> {
    Router::new().route("/next-allowed/{status}", get(lookups::next_allowed))
}

/// Creation wizard helpers, merged into `/wizard`.
///
/// ```text
/// POST   /validate                  validate_wizard_step
/// GET    /phase-defaults            phase_defaults
/// ```
pub fn wizard_router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(lookups::validate_wizard_step))
        .route("/phase-defaults", get(lookups::phase_defaults))
}
