//! Route definitions for `/inspections`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::inspection;
use crate::state::AppState;

/// ```text
/// GET    /{id}                         get_by_id
/// POST   /{id}/status                  change_status
/// GET    /{id}/responses               list_responses
/// PUT    /{id}/responses/{item_id}     upsert_response
/// GET    /{id}/photos                  list_photos
/// POST   /{id}/photos                  add_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(inspection::get_by_id))
        .route("/{id}/status", post(inspection::change_status))
        .route("/{id}/responses", get(inspection::list_responses))
        .route("/{id}/responses/{item_id}", put(inspection::upsert_response))
        .route(
            "/{id}/photos",
            get(inspection::list_photos).post(inspection::add_photo),
        )
}
