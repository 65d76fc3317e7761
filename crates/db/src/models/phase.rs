//! Project phase model.

use serde::{Deserialize, Serialize};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `project_phases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectPhase {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_number: i16,
    pub phase_name: String,
    pub estimated_duration: i32,
    pub status: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhase {
    pub estimated_duration: Option<i32>,
    pub status: Option<String>,
}
