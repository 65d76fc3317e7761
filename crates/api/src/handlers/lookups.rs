//! Public lookup endpoints: status vocabularies, the team-leader transition
//! table, and wizard validation.
//!
//! These need no authentication; they carry no project data and let the UI
//! render badges, buttons and step errors from the same rules the server
//! enforces.

use axum::extract::Path;
use axum::Json;
use serde::{Deserialize, Serialize};
use slf_core::document::{document_status_info, DocumentStatus};
use slf_core::error::FieldErrors;
use slf_core::phases::{Phase, PhaseDurations, MAX_PHASE_DAYS, MIN_PHASE_DAYS};
use slf_core::project_status::{status_info, ProjectStatus, StatusInfo};
use slf_core::wizard::{validate, validate_step_transition, ProjectForm, WizardStep};
use slf_core::workflow;

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Status vocabularies
// ---------------------------------------------------------------------------

/// A project status with the statuses it may move to.
#[derive(Debug, Serialize)]
pub struct ProjectStatusEntry {
    #[serde(flatten)]
    pub info: StatusInfo,
    pub allowed_next: Vec<&'static str>,
}

fn project_status_entry(status: &str) -> ProjectStatusEntry {
    let allowed_next = ProjectStatus::from_str_db(status)
        .map(|s| s.allowed_next().into_iter().map(ProjectStatus::as_str).collect())
        .unwrap_or_default();
    ProjectStatusEntry {
        info: status_info(status),
        allowed_next,
    }
}

/// GET /api/v1/statuses/projects
pub async fn list_project_statuses() -> Json<DataResponse<Vec<ProjectStatusEntry>>> {
    let data = ProjectStatus::ALL
        .iter()
        .map(|s| project_status_entry(s.as_str()))
        .collect();
    Json(DataResponse { data })
}

/// GET /api/v1/statuses/projects/{status}
///
/// Unknown statuses are not an error: they come back with the raw string
/// as label, the neutral color, progress 0 and `known: false`.
pub async fn get_project_status(
    Path(status): Path<String>,
) -> Json<DataResponse<ProjectStatusEntry>> {
    Json(DataResponse {
        data: project_status_entry(&status),
    })
}

/// GET /api/v1/statuses/documents
pub async fn list_document_statuses() -> Json<DataResponse<Vec<StatusInfo>>> {
    let data = DocumentStatus::ALL.iter().map(|s| s.info()).collect();
    Json(DataResponse { data })
}

/// GET /api/v1/statuses/documents/{status}
pub async fn get_document_status(Path(status): Path<String>) -> Json<DataResponse<StatusInfo>> {
    Json(DataResponse {
        data: document_status_info(&status),
    })
}

// ---------------------------------------------------------------------------
// Team-leader transition table
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NextAllowedResponse {
    pub status: String,
    pub next_allowed: Vec<&'static str>,
}

/// GET /api/v1/workflow/next-allowed/{status}
///
/// Terminal and unlisted statuses return an empty list.
pub async fn next_allowed(Path(status): Path<String>) -> Json<DataResponse<NextAllowedResponse>> {
    let next_allowed = workflow::next_allowed(&status);
    Json(DataResponse {
        data: NextAllowedResponse {
            status,
            next_allowed,
        },
    })
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// Request body for `POST /wizard/validate`.
#[derive(Debug, Deserialize)]
pub struct WizardValidateRequest {
    #[serde(default)]
    pub form: ProjectForm,
    /// 0-based index of the step being checked.
    pub step: u8,
    /// When set, also check whether the wizard may move to this step.
    pub next_step: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct StepMove {
    pub to_step: u8,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WizardValidateResponse {
    pub step: u8,
    pub label: &'static str,
    pub valid: bool,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<StepMove>,
}

/// POST /api/v1/wizard/validate
pub async fn validate_wizard_step(
    Json(input): Json<WizardValidateRequest>,
) -> AppResult<Json<DataResponse<WizardValidateResponse>>> {
    let step = WizardStep::from_index(input.step)?;
    let errors = validate(&input.form, step);

    let transition = match input.next_step {
        Some(idx) => {
            let next = WizardStep::from_index(idx)?;
            let result = validate_step_transition(&input.form, step, next);
            Some(StepMove {
                to_step: idx,
                allowed: result.is_ok(),
                reason: result.err().map(|e| e.to_string()),
            })
        }
        None => None,
    };

    Ok(Json(DataResponse {
        data: WizardValidateResponse {
            step: step.index(),
            label: step.label(),
            valid: errors.is_empty(),
            errors,
            transition,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct PhaseDefault {
    pub phase_number: i16,
    pub key: &'static str,
    pub name: &'static str,
    pub default_duration: i32,
}

#[derive(Debug, Serialize)]
pub struct PhaseDefaultsResponse {
    pub phases: Vec<PhaseDefault>,
    pub total_days: i32,
    pub min_days: i32,
    pub max_days: i32,
}

/// GET /api/v1/wizard/phase-defaults
pub async fn phase_defaults() -> Json<DataResponse<PhaseDefaultsResponse>> {
    let phases = Phase::ALL
        .iter()
        .map(|p| PhaseDefault {
            phase_number: p.number(),
            key: p.key(),
            name: p.name(),
            default_duration: p.default_duration(),
        })
        .collect();

    Json(DataResponse {
        data: PhaseDefaultsResponse {
            phases,
            total_days: PhaseDurations::default().total(),
            min_days: MIN_PHASE_DAYS,
            max_days: MAX_PHASE_DAYS,
        },
    })
}
