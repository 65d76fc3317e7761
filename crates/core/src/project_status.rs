//! Project lifecycle status vocabulary.
//!
//! One table maps each status to its display label, color token and
//! completion percentage. The string lookups never fail: unknown statuses
//! fall back to the raw string, [`DEFAULT_STATUS_COLOR`] and `0`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Color token returned for statuses outside the vocabulary.
pub const DEFAULT_STATUS_COLOR: &str = "bg-gray-100 text-gray-800";

/// The twelve persisted project statuses, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Submitted,
    ProjectLeadReview,
    InspectionScheduled,
    InspectionInProgress,
    ReportDraft,
    HeadConsultantReview,
    ClientReview,
    GovernmentSubmitted,
    SlfIssued,
    Completed,
    Cancelled,
}

/// Display metadata for one status, as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub status: String,
    pub label: String,
    pub color: String,
    /// Completion percentage; only meaningful for project statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    pub known: bool,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 12] = [
        Self::Draft,
        Self::Submitted,
        Self::ProjectLeadReview,
        Self::InspectionScheduled,
        Self::InspectionInProgress,
        Self::ReportDraft,
        Self::HeadConsultantReview,
        Self::ClientReview,
        Self::GovernmentSubmitted,
        Self::SlfIssued,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid project status '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ProjectLeadReview => "project_lead_review",
            Self::InspectionScheduled => "inspection_scheduled",
            Self::InspectionInProgress => "inspection_in_progress",
            Self::ReportDraft => "report_draft",
            Self::HeadConsultantReview => "head_consultant_review",
            Self::ClientReview => "client_review",
            Self::GovernmentSubmitted => "government_submitted",
            Self::SlfIssued => "slf_issued",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::ProjectLeadReview => "Project Lead Review",
            Self::InspectionScheduled => "Inspection Scheduled",
            Self::InspectionInProgress => "Inspection In Progress",
            Self::ReportDraft => "Report Draft",
            Self::HeadConsultantReview => "Head Consultant Review",
            Self::ClientReview => "Client Review",
            Self::GovernmentSubmitted => "Submitted to Government",
            Self::SlfIssued => "SLF Issued",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Draft => "bg-slate-100 text-slate-800",
            Self::Submitted => "bg-blue-100 text-blue-800",
            Self::ProjectLeadReview => "bg-indigo-100 text-indigo-800",
            Self::InspectionScheduled => "bg-purple-100 text-purple-800",
            Self::InspectionInProgress => "bg-yellow-100 text-yellow-800",
            Self::ReportDraft => "bg-orange-100 text-orange-800",
            Self::HeadConsultantReview => "bg-pink-100 text-pink-800",
            Self::ClientReview => "bg-cyan-100 text-cyan-800",
            Self::GovernmentSubmitted => "bg-teal-100 text-teal-800",
            Self::SlfIssued => "bg-emerald-100 text-emerald-800",
            Self::Completed => "bg-green-100 text-green-800",
            Self::Cancelled => "bg-red-100 text-red-800",
        }
    }

    /// Completion percentage shown on progress bars.
    pub fn progress(self) -> u8 {
        match self {
            Self::Draft => 10,
            Self::Submitted => 20,
            Self::ProjectLeadReview => 30,
            Self::InspectionScheduled => 40,
            Self::InspectionInProgress => 50,
            Self::ReportDraft => 60,
            Self::HeadConsultantReview => 70,
            Self::ClientReview => 80,
            Self::GovernmentSubmitted => 90,
            Self::SlfIssued => 95,
            Self::Completed => 100,
            Self::Cancelled => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The next status in pipeline order, or `None` for terminal statuses.
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Draft => Some(Self::Submitted),
            Self::Submitted => Some(Self::ProjectLeadReview),
            Self::ProjectLeadReview => Some(Self::InspectionScheduled),
            Self::InspectionScheduled => Some(Self::InspectionInProgress),
            Self::InspectionInProgress => Some(Self::ReportDraft),
            Self::ReportDraft => Some(Self::HeadConsultantReview),
            Self::HeadConsultantReview => Some(Self::ClientReview),
            Self::ClientReview => Some(Self::GovernmentSubmitted),
            Self::GovernmentSubmitted => Some(Self::SlfIssued),
            Self::SlfIssued => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// Statuses this one may move to: its successor, then `cancelled`.
    pub fn allowed_next(self) -> Vec<Self> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.successor()
            .into_iter()
            .chain(std::iter::once(Self::Cancelled))
            .collect()
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn info(self) -> StatusInfo {
        StatusInfo {
            status: self.as_str().to_string(),
            label: self.label().to_string(),
            color: self.color().to_string(),
            progress: Some(self.progress()),
            known: true,
        }
    }
}

/// Validate a move between two persisted project statuses.
pub fn validate_transition(current: ProjectStatus, next: ProjectStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        return Ok(());
    }
    let allowed: Vec<&str> = current.allowed_next().iter().map(|s| s.as_str()).collect();
    Err(CoreError::Conflict(format!(
        "Cannot move project from '{}' to '{}'. Allowed: [{}]",
        current.as_str(),
        next.as_str(),
        allowed.join(", ")
    )))
}

/// Display label for a status string; unknown strings are returned as-is.
pub fn status_label(status: &str) -> String {
    ProjectStatus::from_str_db(status)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|_| status.to_string())
}

/// Color token for a status string; unknown strings get [`DEFAULT_STATUS_COLOR`].
pub fn status_color(status: &str) -> &'static str {
    ProjectStatus::from_str_db(status)
        .map(ProjectStatus::color)
        .unwrap_or(DEFAULT_STATUS_COLOR)
}

/// Completion percentage for a status string; unknown strings get `0`.
pub fn progress_value(status: &str) -> u8 {
    ProjectStatus::from_str_db(status)
        .map(ProjectStatus::progress)
        .unwrap_or(0)
}

/// Full lookup for a status string, with fallbacks for unknown values.
pub fn status_info(status: &str) -> StatusInfo {
    match ProjectStatus::from_str_db(status) {
        Ok(s) => s.info(),
        Err(_) => StatusInfo {
            status: status.to_string(),
            label: status.to_string(),
            color: DEFAULT_STATUS_COLOR.to_string(),
            progress: Some(0),
            known: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_status_has_label_color_and_progress() {
        for status in ProjectStatus::ALL {
            assert!(!status_label(status.as_str()).is_empty());
            assert!(!status_color(status.as_str()).is_empty());
            assert_eq!(progress_value(status.as_str()), status.progress());
        }
    }

    #[test]
    fn progress_weights_follow_pipeline() {
        let weights: Vec<u8> = ProjectStatus::ALL.iter().map(|s| s.progress()).collect();
        assert_eq!(weights, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 100, 0]);
    }

    #[test]
    fn unknown_status_falls_back() {
        assert_eq!(status_label("on_hold"), "on_hold");
        assert_eq!(status_color("on_hold"), DEFAULT_STATUS_COLOR);
        assert_eq!(progress_value("on_hold"), 0);
        assert!(!status_info("on_hold").known);
    }

    #[test]
    fn second_vocabulary_literals_are_unknown_here() {
        for literal in ["inspection_completed", "report_submitted", "admin_lead_review"] {
            assert_eq!(progress_value(literal), 0);
        }
    }

    #[test]
    fn forward_move_and_cancel_are_allowed() {
        assert!(validate_transition(ProjectStatus::Draft, ProjectStatus::Submitted).is_ok());
        assert!(validate_transition(ProjectStatus::ClientReview, ProjectStatus::Cancelled).is_ok());
        assert!(validate_transition(ProjectStatus::SlfIssued, ProjectStatus::Completed).is_ok());
    }

    #[test]
    fn skipping_a_stage_is_a_conflict() {
        assert_matches!(
            validate_transition(ProjectStatus::Draft, ProjectStatus::ReportDraft),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn terminal_statuses_have_no_moves() {
        assert!(ProjectStatus::Completed.allowed_next().is_empty());
        assert!(ProjectStatus::Cancelled.allowed_next().is_empty());
        assert!(!ProjectStatus::Cancelled.can_transition_to(ProjectStatus::Draft));
    }

    #[test]
    fn successor_chain_reaches_completed_in_order() {
        let mut chain = vec![ProjectStatus::Draft];
        while let Some(next) = chain.last().and_then(|s| s.successor()) {
            chain.push(next);
        }
        assert_eq!(chain.len(), 11);
        assert_eq!(chain.last(), Some(&ProjectStatus::Completed));
    }
}
