//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use slf_core::project_status::{status_info, StatusInfo};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<DbId>,
    pub application_type: String,
    pub status: String,
    pub location: Option<String>,
    pub city: Option<String>,
    pub priority: String,
    pub project_lead_id: Option<DbId>,
    pub admin_lead_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub phase_durations: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Display label, color token and progress for the stored status.
    pub fn status_info(&self) -> StatusInfo {
        status_info(&self.status)
    }

    /// Whether `user_id` administers this project.
    pub fn is_administered_by(&self, user_id: DbId) -> bool {
        self.admin_lead_id == Some(user_id) || self.created_by == Some(user_id)
    }
}

/// DTO for editing project details. Status has its own endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<DbId>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub priority: Option<String>,
}

/// Filters for [`ProjectRepo::list`](crate::repositories::ProjectRepo::list).
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<String>,
    /// Only projects this profile leads, administers, or is a team member of.
    pub member_id: Option<DbId>,
    /// Only projects belonging to this client.
    pub client_id: Option<DbId>,
}
