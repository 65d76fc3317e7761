//! Route definitions for `/notifications`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// ```text
/// GET    /                  list
/// POST   /{id}/read         mark_read
/// POST   /read-all          mark_all_read
/// GET    /unread-count      unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list))
        .route("/{id}/read", post(notification::mark_read))
        .route("/read-all", post(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
}
