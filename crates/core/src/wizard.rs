//! Multi-step project creation wizard.
//!
//! Steps run Details -> Client -> Timeline -> Team -> Confirmation. Each step
//! has its own required fields; the Confirmation step re-checks all of them.
//! A clean form is turned into a [`NewProjectPlan`], which the database layer
//! persists in a single transaction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationCategory, ApplicationType, Priority};
use crate::error::{CoreError, FieldErrors};
use crate::phases::{phase_plan, PhaseDurations, PhasePlan};
use crate::project_status::ProjectStatus;
use crate::roles::TeamRole;
use crate::types::DbId;

/// Minimum project name length, after trimming.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum location length, after trimming.
pub const MIN_LOCATION_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    Client,
    Timeline,
    Team,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::Details,
        Self::Client,
        Self::Timeline,
        Self::Team,
        Self::Confirmation,
    ];

    /// Convert a 0-based step index.
    pub fn from_index(idx: u8) -> Result<Self, CoreError> {
        Self::ALL.get(idx as usize).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid step {idx}. Must be between 0 and {}",
                Self::ALL.len() - 1
            ))
        })
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Details => 0,
            Self::Client => 1,
            Self::Timeline => 2,
            Self::Team => 3,
            Self::Confirmation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Project Details",
            Self::Client => "Client",
            Self::Timeline => "Timeline",
            Self::Team => "Team",
            Self::Confirmation => "Confirmation",
        }
    }
}

/// Form data accumulated across wizard steps. Every field may be missing
/// while the user is still filling the form in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub application_category: Option<String>,
    pub application_type: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub priority: Option<String>,
    pub client_id: Option<DbId>,
    pub phase_durations: PhaseDurations,
    pub project_lead_id: Option<DbId>,
    pub inspector_ids: Vec<DbId>,
    pub drafter_id: Option<DbId>,
    pub head_consultant_id: Option<DbId>,
}

fn trimmed(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

fn validate_details(form: &ProjectForm, errors: &mut FieldErrors) {
    let name = trimmed(&form.name);
    if name.is_empty() {
        errors.add("name", "Project name is required");
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.add(
            "name",
            format!("Project name must be at least {MIN_NAME_LEN} characters"),
        );
    }

    let application_type = trimmed(&form.application_type);
    if application_type.is_empty() {
        errors.add("application_type", "Application type is required");
    }

    let category = trimmed(&form.application_category);
    if !category.is_empty() {
        match ApplicationCategory::from_str_db(category) {
            Err(e) => errors.add("application_category", e.to_string()),
            Ok(category) => {
                if let Ok(t) = ApplicationType::from_str_db(application_type) {
                    if t.category() != category {
                        errors.add(
                            "application_type",
                            format!(
                                "Application type {} does not belong to category {}",
                                t.as_str(),
                                category.as_str()
                            ),
                        );
                    }
                }
            }
        }
    }

    let location = trimmed(&form.location);
    if location.is_empty() {
        errors.add("location", "Location is required");
    } else if location.chars().count() < MIN_LOCATION_LEN {
        errors.add(
            "location",
            format!("Location must be at least {MIN_LOCATION_LEN} characters"),
        );
    }

    let priority = trimmed(&form.priority);
    if !priority.is_empty() {
        if let Err(e) = Priority::from_str_db(priority) {
            errors.add("priority", e.to_string());
        }
    }
}

fn validate_client(form: &ProjectForm, errors: &mut FieldErrors) {
    if form.client_id.is_none() {
        errors.add("client_id", "A client must be selected");
    }
}

fn validate_team(form: &ProjectForm, errors: &mut FieldErrors) {
    if form.project_lead_id.is_none() {
        errors.add("project_lead_id", "A project lead must be selected");
    }
    let mut seen = HashSet::new();
    if form.inspector_ids.iter().any(|id| !seen.insert(*id)) {
        errors.add("inspector_ids", "Each inspector may only be selected once");
    }
}

/// Validate the fields owned by `step`. Empty when the step is complete.
pub fn validate(form: &ProjectForm, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        WizardStep::Details => validate_details(form, &mut errors),
        WizardStep::Client => validate_client(form, &mut errors),
        WizardStep::Timeline => errors.extend(form.phase_durations.validate()),
        WizardStep::Team => validate_team(form, &mut errors),
        WizardStep::Confirmation => {
            validate_details(form, &mut errors);
            validate_client(form, &mut errors);
            errors.extend(form.phase_durations.validate());
            validate_team(form, &mut errors);
        }
    }
    errors
}

/// Validate a partial edit of an existing project's details. Only the
/// fields being changed are checked, with the same rules as the wizard.
pub fn validate_edit(
    name: Option<&str>,
    location: Option<&str>,
    priority: Option<&str>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = name {
        if name.trim().chars().count() < MIN_NAME_LEN {
            errors.add(
                "name",
                format!("Project name must be at least {MIN_NAME_LEN} characters"),
            );
        }
    }
    if let Some(location) = location {
        if location.trim().chars().count() < MIN_LOCATION_LEN {
            errors.add(
                "location",
                format!("Location must be at least {MIN_LOCATION_LEN} characters"),
            );
        }
    }
    if let Some(priority) = priority {
        if let Err(e) = Priority::from_str_db(priority) {
            errors.add("priority", e.to_string());
        }
    }
    errors
}

/// Validate moving from `current` to `next`.
///
/// Going back one step is always allowed. Advancing one step requires the
/// current step to be complete. Jumps of more than one step are rejected.
pub fn validate_step_transition(
    form: &ProjectForm,
    current: WizardStep,
    next: WizardStep,
) -> Result<(), CoreError> {
    let diff = next.index() as i16 - current.index() as i16;
    match diff {
        -1 => Ok(()),
        1 => validate(form, current).into_result(),
        _ => Err(CoreError::Validation(format!(
            "Cannot move from step {} to step {}. Must advance or go back exactly one step.",
            current.index(),
            next.index()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A team member row to insert with a new project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamAssignment {
    pub user_id: DbId,
    pub role: TeamRole,
}

/// Everything needed to persist a new project atomically.
#[derive(Debug, Clone, Serialize)]
pub struct NewProjectPlan {
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<DbId>,
    pub application_type: ApplicationType,
    pub status: ProjectStatus,
    pub location: Option<String>,
    pub city: Option<String>,
    pub priority: Priority,
    pub project_lead_id: Option<DbId>,
    pub admin_lead_id: DbId,
    pub created_by: DbId,
    pub phase_durations: PhaseDurations,
    pub phases: Vec<PhasePlan>,
    pub team: Vec<TeamAssignment>,
}

impl NewProjectPlan {
    /// Add a team row unless the same (user, role) pair is already planned.
    pub fn assign(&mut self, user_id: DbId, role: TeamRole) {
        let assignment = TeamAssignment { user_id, role };
        if !self.team.contains(&assignment) {
            self.team.push(assignment);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ProjectForm {
    /// Turn a complete form into a project plan created by `admin_id`.
    ///
    /// New projects start as `draft` with phase 1 in progress.
    pub fn into_plan(self, admin_id: DbId) -> Result<NewProjectPlan, CoreError> {
        validate(&self, WizardStep::Confirmation).into_result()?;
        self.build_plan(admin_id)
    }

    /// Build the plan without step validation; callers validate first.
    pub(crate) fn build_plan(self, admin_id: DbId) -> Result<NewProjectPlan, CoreError> {
        let application_type = ApplicationType::from_str_db(trimmed(&self.application_type))
            .map_err(|e| {
                let mut errors = FieldErrors::new();
                errors.add("application_type", e.to_string());
                CoreError::InvalidFields(errors)
            })?;
        let priority = match non_empty(&self.priority) {
            Some(p) => Priority::from_str_db(&p)?,
            None => Priority::default(),
        };

        let mut plan = NewProjectPlan {
            name: trimmed(&self.name).to_string(),
            description: non_empty(&self.description),
            client_id: self.client_id,
            application_type,
            status: ProjectStatus::Draft,
            location: non_empty(&self.location),
            city: non_empty(&self.city),
            priority,
            project_lead_id: self.project_lead_id,
            admin_lead_id: admin_id,
            created_by: admin_id,
            phase_durations: self.phase_durations,
            phases: phase_plan(&self.phase_durations),
            team: Vec::new(),
        };

        plan.assign(admin_id, TeamRole::AdminLead);
        if let Some(lead) = self.project_lead_id {
            plan.assign(lead, TeamRole::ProjectLead);
        }
        for inspector in &self.inspector_ids {
            plan.assign(*inspector, TeamRole::Inspector);
        }
        if let Some(drafter) = self.drafter_id {
            plan.assign(drafter, TeamRole::Drafter);
        }
        if let Some(hc) = self.head_consultant_id {
            plan.assign(hc, TeamRole::HeadConsultant);
        }

        Ok(plan)
    }
}
