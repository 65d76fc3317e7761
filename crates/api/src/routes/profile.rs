//! Route definitions for `/profiles`.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// ```text
/// GET    /          list (?role=)
/// GET    /me        me
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::list))
        .route("/me", get(profile::me))
}
