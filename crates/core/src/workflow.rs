//! Team-leader transition table.
//!
//! This table is keyed by its own status vocabulary, which overlaps with but
//! differs from [`ProjectStatus`]: it has `inspection_completed`,
//! `report_submitted`, `admin_lead_review` and `revisions_required`, and lacks
//! `head_consultant_review`. The two vocabularies are kept as separate types;
//! [`LeadWorkflowStatus::shared_project_status`] maps only literals present in
//! both.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project_status::ProjectStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadWorkflowStatus {
    ProjectLeadReview,
    InspectionScheduled,
    InspectionInProgress,
    InspectionCompleted,
    ReportDraft,
    ReportSubmitted,
    AdminLeadReview,
    RevisionsRequired,
    ClientReview,
    GovernmentSubmitted,
    SlfIssued,
    Completed,
    Cancelled,
}

use LeadWorkflowStatus as W;

impl LeadWorkflowStatus {
    pub const ALL: [LeadWorkflowStatus; 13] = [
        W::ProjectLeadReview,
        W::InspectionScheduled,
        W::InspectionInProgress,
        W::InspectionCompleted,
        W::ReportDraft,
        W::ReportSubmitted,
        W::AdminLeadReview,
        W::RevisionsRequired,
        W::ClientReview,
        W::GovernmentSubmitted,
        W::SlfIssued,
        W::Completed,
        W::Cancelled,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid workflow status '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            W::ProjectLeadReview => "project_lead_review",
            W::InspectionScheduled => "inspection_scheduled",
            W::InspectionInProgress => "inspection_in_progress",
            W::InspectionCompleted => "inspection_completed",
            W::ReportDraft => "report_draft",
            W::ReportSubmitted => "report_submitted",
            W::AdminLeadReview => "admin_lead_review",
            W::RevisionsRequired => "revisions_required",
            W::ClientReview => "client_review",
            W::GovernmentSubmitted => "government_submitted",
            W::SlfIssued => "slf_issued",
            W::Completed => "completed",
            W::Cancelled => "cancelled",
        }
    }

    /// Statuses reachable in one step. Empty for terminal statuses.
    pub fn next_allowed(self) -> &'static [LeadWorkflowStatus] {
        match self {
            W::ProjectLeadReview => &[W::InspectionScheduled, W::Cancelled],
            W::InspectionScheduled => &[W::InspectionInProgress, W::Cancelled],
            W::InspectionInProgress => &[W::InspectionCompleted, W::Cancelled],
            W::InspectionCompleted => &[W::ReportDraft, W::Cancelled],
            W::ReportDraft => &[W::ReportSubmitted, W::Cancelled],
            W::ReportSubmitted => &[W::AdminLeadReview, W::Cancelled],
            W::AdminLeadReview => &[W::ClientReview, W::RevisionsRequired, W::Cancelled],
            W::RevisionsRequired => &[W::ReportDraft, W::Cancelled],
            W::ClientReview => &[W::GovernmentSubmitted, W::RevisionsRequired, W::Cancelled],
            W::GovernmentSubmitted => &[W::SlfIssued, W::Cancelled],
            W::SlfIssued => &[W::Completed, W::Cancelled],
            W::Completed | W::Cancelled => &[],
        }
    }

    /// The persisted project status with the same literal, if there is one.
    pub fn shared_project_status(self) -> Option<ProjectStatus> {
        ProjectStatus::from_str_db(self.as_str()).ok()
    }
}

/// Allowed next statuses for a status string; empty for unlisted strings.
pub fn next_allowed(status: &str) -> Vec<&'static str> {
    LeadWorkflowStatus::from_str_db(status)
        .map(|s| s.next_allowed().iter().map(|n| n.as_str()).collect())
        .unwrap_or_default()
}

/// Validate a move in the team-leader table.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    let allowed = next_allowed(current);
    if allowed.contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot transition from '{current}' to '{next}'. Allowed transitions: {allowed:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn set(items: Vec<&'static str>) -> HashSet<&'static str> {
        items.into_iter().collect()
    }

    #[test]
    fn scheduled_moves_to_in_progress_or_cancelled() {
        assert_eq!(
            set(next_allowed("inspection_scheduled")),
            set(vec!["inspection_in_progress", "cancelled"])
        );
    }

    #[test]
    fn completed_is_terminal() {
        assert!(next_allowed("completed").is_empty());
        assert!(next_allowed("cancelled").is_empty());
    }

    #[test]
    fn unlisted_status_has_no_moves() {
        assert!(next_allowed("draft").is_empty());
        assert!(next_allowed("head_consultant_review").is_empty());
        assert!(next_allowed("").is_empty());
    }

    #[test]
    fn review_stages_can_request_revisions() {
        assert!(next_allowed("admin_lead_review").contains(&"revisions_required"));
        assert!(next_allowed("client_review").contains(&"revisions_required"));
        assert_eq!(next_allowed("revisions_required"), vec!["report_draft", "cancelled"]);
    }

    #[test]
    fn every_non_terminal_status_can_be_cancelled() {
        for status in LeadWorkflowStatus::ALL {
            if matches!(status, W::Completed | W::Cancelled) {
                continue;
            }
            assert!(status.next_allowed().contains(&W::Cancelled), "{status:?}");
        }
    }

    #[test]
    fn only_shared_literals_map_to_project_status() {
        assert_eq!(
            W::ClientReview.shared_project_status(),
            Some(ProjectStatus::ClientReview)
        );
        assert_eq!(W::AdminLeadReview.shared_project_status(), None);
        assert_eq!(W::InspectionCompleted.shared_project_status(), None);
        assert_eq!(W::RevisionsRequired.shared_project_status(), None);
        assert_eq!(W::ReportSubmitted.shared_project_status(), None);
    }

    #[test]
    fn transition_validation() {
        assert!(validate_transition("slf_issued", "completed").is_ok());
        assert!(validate_transition("report_draft", "client_review").is_err());
    }
}
