//! Inspection status moves and scheduling checks.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl InspectionStatus {
    pub const ALL: [InspectionStatus; 5] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Rejected,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid inspection status '{s}'")))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    pub fn next_allowed(self) -> &'static [InspectionStatus] {
        match self {
            Self::Scheduled => &[Self::InProgress, Self::Cancelled, Self::Rejected],
            Self::InProgress => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled | Self::Rejected => &[],
        }
    }

    /// Checklist answers and photos are only accepted while in progress.
    pub fn accepts_evidence(self) -> bool {
        self == Self::InProgress
    }
}

pub fn validate_transition(
    current: InspectionStatus,
    next: InspectionStatus,
) -> Result<(), CoreError> {
    if current.next_allowed().contains(&next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move inspection from '{}' to '{}'",
            current.as_str(),
            next.as_str()
        )))
    }
}

/// Both times are optional; when both are present the window must be positive.
pub fn validate_time_window(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<(), CoreError> {
    match (start, end) {
        (Some(s), Some(e)) if e <= s => Err(CoreError::Validation(format!(
            "Inspection end time {e} must be after start time {s}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn scheduled_inspection_can_start_or_be_dropped() {
        use InspectionStatus::*;
        assert!(validate_transition(Scheduled, InProgress).is_ok());
        assert!(validate_transition(Scheduled, Cancelled).is_ok());
        assert!(validate_transition(Scheduled, Rejected).is_ok());
        assert_matches!(
            validate_transition(Scheduled, Completed),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn finished_inspections_are_terminal() {
        use InspectionStatus::*;
        for status in [Completed, Cancelled, Rejected] {
            assert!(status.next_allowed().is_empty());
        }
    }

    #[test]
    fn evidence_only_while_in_progress() {
        assert!(InspectionStatus::InProgress.accepts_evidence());
        assert!(!InspectionStatus::Scheduled.accepts_evidence());
        assert!(!InspectionStatus::Completed.accepts_evidence());
    }

    #[test]
    fn time_window() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0);
        let noon = NaiveTime::from_hms_opt(12, 0, 0);
        assert!(validate_time_window(nine, noon).is_ok());
        assert!(validate_time_window(noon, nine).is_err());
        assert!(validate_time_window(nine, nine).is_err());
        assert!(validate_time_window(None, nine).is_ok());
    }
}
