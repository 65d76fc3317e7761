use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: slf_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Handlers publish workflow events here after their writes commit.
    pub event_bus: Arc<slf_events::EventBus>,
}
