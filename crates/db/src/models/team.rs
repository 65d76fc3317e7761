//! Project team membership.

use serde::{Deserialize, Serialize};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `project_teams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectTeamMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub assigned_at: Timestamp,
    pub assigned_by: Option<DbId>,
}

/// Team member joined with the member's profile, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMemberWithProfile {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub assigned_at: Timestamp,
    pub assigned_by: Option<DbId>,
    pub full_name: String,
    pub email: String,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub user_id: DbId,
    pub role: String,
}
