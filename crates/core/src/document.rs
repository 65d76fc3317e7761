//! Document and report status vocabulary, review actions, and document types.
//!
//! The display vocabulary covers every status a document or inspection
//! report can show. Only the lifecycle subset is persisted on `documents`;
//! review actions move a document through that subset.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project_status::{StatusInfo, DEFAULT_STATUS_COLOR};
use crate::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Submitted,
    VerifiedByAdminTeam,
    ApprovedByPl,
    ApprovedByHc,
    RevisionRequestedByHc,
    Rejected,
    Approved,
    Cancelled,
    Completed,
    Scheduled,
    InProgress,
}

use DocumentStatus as D;

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 12] = [
        D::Draft,
        D::Submitted,
        D::VerifiedByAdminTeam,
        D::ApprovedByPl,
        D::ApprovedByHc,
        D::RevisionRequestedByHc,
        D::Rejected,
        D::Approved,
        D::Cancelled,
        D::Completed,
        D::Scheduled,
        D::InProgress,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid document status '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            D::Draft => "draft",
            D::Submitted => "submitted",
            D::VerifiedByAdminTeam => "verified_by_admin_team",
            D::ApprovedByPl => "approved_by_pl",
            D::ApprovedByHc => "approved_by_hc",
            D::RevisionRequestedByHc => "revision_requested_by_hc",
            D::Rejected => "rejected",
            D::Approved => "approved",
            D::Cancelled => "cancelled",
            D::Completed => "completed",
            D::Scheduled => "scheduled",
            D::InProgress => "in_progress",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            D::Draft => "Draft",
            D::Submitted => "Submitted",
            D::VerifiedByAdminTeam => "Verified by Admin Team",
            D::ApprovedByPl => "Approved by Project Lead",
            D::ApprovedByHc => "Approved by Head Consultant",
            D::RevisionRequestedByHc => "Revision Requested by Head Consultant",
            D::Rejected => "Rejected",
            D::Approved => "Approved",
            D::Cancelled => "Cancelled",
            D::Completed => "Completed",
            D::Scheduled => "Scheduled",
            D::InProgress => "In Progress",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            D::Draft => "bg-slate-100 text-slate-800",
            D::Submitted => "bg-blue-100 text-blue-800",
            D::VerifiedByAdminTeam => "bg-indigo-100 text-indigo-800",
            D::ApprovedByPl => "bg-teal-100 text-teal-800",
            D::ApprovedByHc => "bg-emerald-100 text-emerald-800",
            D::RevisionRequestedByHc => "bg-orange-100 text-orange-800",
            D::Rejected => "bg-red-100 text-red-800",
            D::Approved => "bg-green-100 text-green-800",
            D::Cancelled => "bg-red-100 text-red-800",
            D::Completed => "bg-green-100 text-green-800",
            D::Scheduled => "bg-purple-100 text-purple-800",
            D::InProgress => "bg-yellow-100 text-yellow-800",
        }
    }

    /// Whether this status may be stored on a `documents` row.
    pub fn is_persisted_lifecycle(self) -> bool {
        matches!(
            self,
            D::Draft
                | D::Submitted
                | D::VerifiedByAdminTeam
                | D::ApprovedByPl
                | D::ApprovedByHc
                | D::RevisionRequestedByHc
                | D::Rejected
                | D::Approved
        )
    }

    pub fn info(self) -> StatusInfo {
        StatusInfo {
            status: self.as_str().to_string(),
            label: self.label().to_string(),
            color: self.color().to_string(),
            progress: None,
            known: true,
        }
    }
}

pub fn document_status_label(status: &str) -> String {
    DocumentStatus::from_str_db(status)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|_| status.to_string())
}

pub fn document_status_color(status: &str) -> &'static str {
    DocumentStatus::from_str_db(status)
        .map(DocumentStatus::color)
        .unwrap_or(DEFAULT_STATUS_COLOR)
}

pub fn document_status_info(status: &str) -> StatusInfo {
    match DocumentStatus::from_str_db(status) {
        Ok(s) => s.info(),
        Err(_) => StatusInfo {
            status: status.to_string(),
            label: status.to_string(),
            color: DEFAULT_STATUS_COLOR.to_string(),
            progress: None,
            known: false,
        },
    }
}

// ---------------------------------------------------------------------------
// Review actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    Submit,
    Verify,
    ApproveByProjectLead,
    ApproveByHeadConsultant,
    RequestRevision,
    Reject,
    Finalize,
}

impl DocumentAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Verify => "verify",
            Self::ApproveByProjectLead => "approve_by_project_lead",
            Self::ApproveByHeadConsultant => "approve_by_head_consultant",
            Self::RequestRevision => "request_revision",
            Self::Reject => "reject",
            Self::Finalize => "finalize",
        }
    }

    /// Statuses from which this action may be taken.
    pub fn sources(self) -> &'static [DocumentStatus] {
        match self {
            Self::Submit => &[D::Draft, D::RevisionRequestedByHc],
            Self::Verify => &[D::Submitted],
            Self::ApproveByProjectLead => &[D::VerifiedByAdminTeam],
            Self::ApproveByHeadConsultant | Self::RequestRevision => &[D::ApprovedByPl],
            Self::Reject => &[D::Submitted, D::VerifiedByAdminTeam, D::ApprovedByPl],
            Self::Finalize => &[D::ApprovedByHc],
        }
    }

    pub fn target(self) -> DocumentStatus {
        match self {
            Self::Submit => D::Submitted,
            Self::Verify => D::VerifiedByAdminTeam,
            Self::ApproveByProjectLead => D::ApprovedByPl,
            Self::ApproveByHeadConsultant => D::ApprovedByHc,
            Self::RequestRevision => D::RevisionRequestedByHc,
            Self::Reject => D::Rejected,
            Self::Finalize => D::Approved,
        }
    }

    /// Whether `role` may take this action. Superadmins may take any action.
    pub fn permits(self, role: Role) -> bool {
        if role == Role::Superadmin {
            return true;
        }
        match self {
            Self::Submit => true,
            Self::Verify | Self::Finalize => role == Role::AdminLead,
            Self::ApproveByProjectLead => role == Role::ProjectLead,
            Self::ApproveByHeadConsultant | Self::RequestRevision => {
                role == Role::HeadConsultant
            }
            Self::Reject => matches!(
                role,
                Role::AdminLead | Role::ProjectLead | Role::HeadConsultant
            ),
        }
    }

    /// Compute the resulting status of taking this action from `current`.
    pub fn apply(self, current: DocumentStatus, role: Role) -> Result<DocumentStatus, CoreError> {
        if !self.permits(role) {
            return Err(CoreError::Forbidden(format!(
                "Role '{}' may not {} documents",
                role.as_str(),
                self.as_str()
            )));
        }
        if !self.sources().contains(&current) {
            return Err(CoreError::Conflict(format!(
                "Cannot {} a document in status '{}'",
                self.as_str(),
                current.as_str()
            )));
        }
        Ok(self.target())
    }
}

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Report,
    Contract,
    Drawing,
    Permit,
    Photo,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 6] = [
        Self::Report,
        Self::Contract,
        Self::Drawing,
        Self::Permit,
        Self::Photo,
        Self::Other,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid document type '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Report => "REPORT",
            Self::Contract => "CONTRACT",
            Self::Drawing => "DRAWING",
            Self::Permit => "PERMIT",
            Self::Photo => "PHOTO",
            Self::Other => "OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_status_has_a_label_and_color() {
        for status in DocumentStatus::ALL {
            assert!(!document_status_label(status.as_str()).is_empty());
            assert!(!document_status_color(status.as_str()).is_empty());
        }
    }

    #[test]
    fn unknown_document_status_falls_back() {
        assert_eq!(document_status_label("archived"), "archived");
        assert_eq!(document_status_color("archived"), DEFAULT_STATUS_COLOR);
    }

    #[test]
    fn full_review_path() {
        let mut status = D::Draft;
        for (action, role) in [
            (DocumentAction::Submit, Role::Drafter),
            (DocumentAction::Verify, Role::AdminLead),
            (DocumentAction::ApproveByProjectLead, Role::ProjectLead),
            (DocumentAction::ApproveByHeadConsultant, Role::HeadConsultant),
            (DocumentAction::Finalize, Role::AdminLead),
        ] {
            status = action.apply(status, role).unwrap();
        }
        assert_eq!(status, D::Approved);
    }

    #[test]
    fn revision_request_returns_to_submit() {
        let status = DocumentAction::RequestRevision
            .apply(D::ApprovedByPl, Role::HeadConsultant)
            .unwrap();
        assert_eq!(status, D::RevisionRequestedByHc);
        let status = DocumentAction::Submit.apply(status, Role::Drafter).unwrap();
        assert_eq!(status, D::Submitted);
    }

    #[test]
    fn approving_an_unverified_document_conflicts() {
        assert_matches!(
            DocumentAction::ApproveByHeadConsultant.apply(D::Submitted, Role::HeadConsultant),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn wrong_role_is_forbidden() {
        assert_matches!(
            DocumentAction::Verify.apply(D::Submitted, Role::Inspector),
            Err(CoreError::Forbidden(_))
        );
        assert!(DocumentAction::Verify.apply(D::Submitted, Role::Superadmin).is_ok());
    }

    #[test]
    fn action_targets_are_persistable() {
        for action in [
            DocumentAction::Submit,
            DocumentAction::Verify,
            DocumentAction::ApproveByProjectLead,
            DocumentAction::ApproveByHeadConsultant,
            DocumentAction::RequestRevision,
            DocumentAction::Reject,
            DocumentAction::Finalize,
        ] {
            assert!(action.target().is_persisted_lifecycle());
        }
    }

    #[test]
    fn document_type_literals_are_uppercase() {
        assert_eq!(DocumentType::from_str_db("REPORT").unwrap(), DocumentType::Report);
        assert!(DocumentType::from_str_db("report").is_err());
    }
}
