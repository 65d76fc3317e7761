//! Route definitions for `/documents`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// ```text
/// POST   /                  create
/// GET    /{id}              get_by_id
/// POST   /{id}/actions      take_action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(document::create))
        .route("/{id}", get(document::get_by_id))
        .route("/{id}/actions", post(document::take_action))
}
