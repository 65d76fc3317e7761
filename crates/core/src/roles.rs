//! Profile roles and project team roles.
//!
//! Role literals must match the `CHECK` constraints on `profiles.role` and
//! `project_teams.role`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN_LEAD: &str = "admin_lead";
pub const ROLE_PROJECT_LEAD: &str = "project_lead";
pub const ROLE_INSPECTOR: &str = "inspector";
pub const ROLE_DRAFTER: &str = "drafter";
pub const ROLE_HEAD_CONSULTANT: &str = "head_consultant";
pub const ROLE_CLIENT: &str = "client";
pub const ROLE_SUPERADMIN: &str = "superadmin";

/// Role carried by a user profile (and by the access token's `role` claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    AdminLead,
    ProjectLead,
    Inspector,
    Drafter,
    HeadConsultant,
    Client,
    Superadmin,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::AdminLead,
        Role::ProjectLead,
        Role::Inspector,
        Role::Drafter,
        Role::HeadConsultant,
        Role::Client,
        Role::Superadmin,
    ];

    /// Parse a role string from the database or a token claim.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid role '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminLead => ROLE_ADMIN_LEAD,
            Self::ProjectLead => ROLE_PROJECT_LEAD,
            Self::Inspector => ROLE_INSPECTOR,
            Self::Drafter => ROLE_DRAFTER,
            Self::HeadConsultant => ROLE_HEAD_CONSULTANT,
            Self::Client => ROLE_CLIENT,
            Self::Superadmin => ROLE_SUPERADMIN,
        }
    }

    /// Admin leads and superadmins manage projects, teams and triage.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::AdminLead | Self::Superadmin)
    }

    /// Staff roles are everyone except client-side users.
    pub fn is_staff(self) -> bool {
        !matches!(self, Self::Client)
    }
}

/// Role a profile holds within a single project team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    ProjectLead,
    Inspector,
    Drafter,
    HeadConsultant,
    AdminLead,
}

impl TeamRole {
    pub const ALL: [TeamRole; 5] = [
        TeamRole::ProjectLead,
        TeamRole::Inspector,
        TeamRole::Drafter,
        TeamRole::HeadConsultant,
        TeamRole::AdminLead,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid team role '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProjectLead => ROLE_PROJECT_LEAD,
            Self::Inspector => ROLE_INSPECTOR,
            Self::Drafter => ROLE_DRAFTER,
            Self::HeadConsultant => ROLE_HEAD_CONSULTANT,
            Self::AdminLead => ROLE_ADMIN_LEAD,
        }
    }

    /// The profile role a member must hold to take this team role.
    pub fn required_profile_role(self) -> Role {
        match self {
            Self::ProjectLead => Role::ProjectLead,
            Self::Inspector => Role::Inspector,
            Self::Drafter => Role::Drafter,
            Self::HeadConsultant => Role::HeadConsultant,
            Self::AdminLead => Role::AdminLead,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_role_round_trips_through_its_literal() {
        for role in Role::ALL {
            assert_eq!(Role::from_str_db(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_matches!(Role::from_str_db("owner"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn client_is_not_a_team_role() {
        assert!(TeamRole::from_str_db(ROLE_CLIENT).is_err());
        assert!(TeamRole::from_str_db(ROLE_SUPERADMIN).is_err());
    }

    #[test]
    fn admin_roles() {
        assert!(Role::AdminLead.is_admin());
        assert!(Role::Superadmin.is_admin());
        assert!(!Role::ProjectLead.is_admin());
        assert!(!Role::Client.is_staff());
    }

    #[test]
    fn team_role_maps_to_matching_profile_role() {
        for role in TeamRole::ALL {
            assert_eq!(role.required_profile_role().as_str(), role.as_str());
        }
    }
}
