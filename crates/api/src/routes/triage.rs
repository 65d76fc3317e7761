//! Route definitions for `/triage` (admin only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::triage;
use crate::state::AppState;

/// ```text
/// GET    /pending           list_pending
/// POST   /new-project       create_project
/// POST   /link              link_to_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(triage::list_pending))
        .route("/new-project", post(triage::create_project))
        .route("/link", post(triage::link_to_project))
}
