//! The five fixed project execution phases and their duration plan.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldErrors};

/// Minimum estimated duration for a phase, in days.
pub const MIN_PHASE_DAYS: i32 = 1;

/// Maximum estimated duration for a phase, in days.
pub const MAX_PHASE_DAYS: i32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preparation,
    Inspection,
    Reporting,
    Approval,
    GovernmentSubmission,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Self::Preparation,
        Self::Inspection,
        Self::Reporting,
        Self::Approval,
        Self::GovernmentSubmission,
    ];

    /// 1-based phase number.
    pub fn number(self) -> i16 {
        match self {
            Self::Preparation => 1,
            Self::Inspection => 2,
            Self::Reporting => 3,
            Self::Approval => 4,
            Self::GovernmentSubmission => 5,
        }
    }

    pub fn from_number(n: i16) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|p| p.number() == n)
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid phase number {n}. Must be between 1 and 5"))
            })
    }

    /// Key used in the `phase_durations` map.
    pub fn key(self) -> &'static str {
        match self {
            Self::Preparation => "preparation",
            Self::Inspection => "inspection",
            Self::Reporting => "reporting",
            Self::Approval => "approval",
            Self::GovernmentSubmission => "government_submission",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Preparation => "Preparation",
            Self::Inspection => "Inspection",
            Self::Reporting => "Reporting",
            Self::Approval => "Approval",
            Self::GovernmentSubmission => "Government Submission",
        }
    }

    pub fn default_duration(self) -> i32 {
        match self {
            Self::Preparation => 7,
            Self::Inspection => 5,
            Self::Reporting => 10,
            Self::Approval => 7,
            Self::GovernmentSubmission => 14,
        }
    }
}

/// Estimated days per phase, serialized as a map of phase key to days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub preparation: i32,
    pub inspection: i32,
    pub reporting: i32,
    pub approval: i32,
    pub government_submission: i32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            preparation: Phase::Preparation.default_duration(),
            inspection: Phase::Inspection.default_duration(),
            reporting: Phase::Reporting.default_duration(),
            approval: Phase::Approval.default_duration(),
            government_submission: Phase::GovernmentSubmission.default_duration(),
        }
    }
}

impl PhaseDurations {
    pub fn get(&self, phase: Phase) -> i32 {
        match phase {
            Phase::Preparation => self.preparation,
            Phase::Inspection => self.inspection,
            Phase::Reporting => self.reporting,
            Phase::Approval => self.approval,
            Phase::GovernmentSubmission => self.government_submission,
        }
    }

    pub fn set(&mut self, phase: Phase, days: i32) {
        match phase {
            Phase::Preparation => self.preparation = days,
            Phase::Inspection => self.inspection = days,
            Phase::Reporting => self.reporting = days,
            Phase::Approval => self.approval = days,
            Phase::GovernmentSubmission => self.government_submission = days,
        }
    }

    /// Total planned days across all phases.
    pub fn total(&self) -> i32 {
        Phase::ALL.iter().map(|p| self.get(*p)).sum()
    }

    /// Per-phase range check, keyed `phase_durations.<key>`.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for phase in Phase::ALL {
            let days = self.get(phase);
            if !(MIN_PHASE_DAYS..=MAX_PHASE_DAYS).contains(&days) {
                errors.add(
                    format!("phase_durations.{}", phase.key()),
                    format!(
                        "{} duration must be between {MIN_PHASE_DAYS} and {MAX_PHASE_DAYS} days",
                        phase.name()
                    ),
                );
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid phase status '{s}'. Must be one of: pending, in_progress, completed"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// One `project_phases` row to be inserted alongside a new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhasePlan {
    pub phase_number: i16,
    pub phase_name: &'static str,
    pub estimated_duration: i32,
    pub status: PhaseStatus,
    pub order_index: i32,
}

/// Build the five phase rows for a new project.
///
/// Phase 1 starts `in_progress`; the rest are `pending`.
pub fn phase_plan(durations: &PhaseDurations) -> Vec<PhasePlan> {
    Phase::ALL
        .iter()
        .enumerate()
        .map(|(idx, phase)| PhasePlan {
            phase_number: phase.number(),
            phase_name: phase.name(),
            estimated_duration: durations.get(*phase),
            status: if idx == 0 {
                PhaseStatus::InProgress
            } else {
                PhaseStatus::Pending
            },
            order_index: idx as i32,
        })
        .collect()
}
