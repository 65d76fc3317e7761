//! Triage of unlinked ("pending") documents.
//!
//! Uploaded documents arrive without a project. Admins see them grouped by
//! the uploader's client and either start a new project from them (building
//! details carried over from the document metadata) or attach them to an
//! existing project.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldErrors};
use crate::phases::PhaseDurations;
use crate::types::DbId;
use crate::wizard::{validate, NewProjectPlan, ProjectForm, WizardStep};

/// Group key for documents whose uploader has no client.
pub const UNKNOWN_CLIENT_KEY: &str = "unknown";

/// Documents from one client, or from uploaders without a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientGroup<T> {
    /// Client id as a string, or [`UNKNOWN_CLIENT_KEY`].
    pub key: String,
    pub client_id: Option<DbId>,
    pub documents: Vec<T>,
}

/// Group documents by their uploader's client.
///
/// Known clients come first in ascending id order; the `unknown` group, if
/// any, is last. Document order within a group is preserved.
pub fn group_by_client<T, F>(documents: Vec<T>, client_of: F) -> Vec<ClientGroup<T>>
where
    F: Fn(&T) -> Option<DbId>,
{
    let mut known: BTreeMap<DbId, Vec<T>> = BTreeMap::new();
    let mut unknown: Vec<T> = Vec::new();

    for doc in documents {
        match client_of(&doc) {
            Some(client_id) => known.entry(client_id).or_default().push(doc),
            None => unknown.push(doc),
        }
    }

    let mut groups: Vec<ClientGroup<T>> = known
        .into_iter()
        .map(|(client_id, documents)| ClientGroup {
            key: client_id.to_string(),
            client_id: Some(client_id),
            documents,
        })
        .collect();

    if !unknown.is_empty() {
        groups.push(ClientGroup {
            key: UNKNOWN_CLIENT_KEY.to_string(),
            client_id: None,
            documents: unknown,
        });
    }

    groups
}

/// Project fields recovered from a document's `metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPrefill {
    pub name: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub application_type: Option<String>,
}

fn string_at(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl ProjectPrefill {
    /// Read `metadata.building_info` (and `metadata.application_type`).
    ///
    /// Missing or malformed metadata yields an empty prefill.
    pub fn from_metadata(metadata: &serde_json::Value) -> Self {
        let building = metadata
            .get("building_info")
            .filter(|b| b.is_object())
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Self {
            name: string_at(&building, &["name", "building_name"]),
            location: string_at(&building, &["location", "address"]),
            city: string_at(&building, &["city"]),
            application_type: string_at(&building, &["application_type"])
                .or_else(|| string_at(metadata, &["application_type"])),
        }
    }
}

/// Fields for a project created from pending documents. Anything left out
/// is taken from the first selected document's building info.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TriageProjectFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub application_type: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub priority: Option<String>,
    pub client_id: Option<DbId>,
    pub project_lead_id: Option<DbId>,
    pub phase_durations: Option<PhaseDurations>,
}

fn pick(explicit: Option<String>, fallback: Option<String>) -> Option<String> {
    explicit
        .filter(|s| !s.trim().is_empty())
        .or(fallback)
}

/// Build a project plan for the triage "new project" path.
///
/// Only the details and timeline rules apply; client and project lead may
/// be assigned later.
pub fn triage_plan(
    fields: TriageProjectFields,
    prefill: ProjectPrefill,
    admin_id: DbId,
) -> Result<NewProjectPlan, CoreError> {
    let form = ProjectForm {
        name: pick(fields.name, prefill.name),
        description: fields.description,
        application_category: None,
        application_type: pick(fields.application_type, prefill.application_type),
        location: pick(fields.location, prefill.location),
        city: pick(fields.city, prefill.city),
        priority: fields.priority,
        client_id: fields.client_id,
        phase_durations: fields.phase_durations.unwrap_or_default(),
        project_lead_id: fields.project_lead_id,
        inspector_ids: Vec::new(),
        drafter_id: None,
        head_consultant_id: None,
    };

    let mut errors = FieldErrors::new();
    errors.extend(validate(&form, WizardStep::Details));
    errors.extend(validate(&form, WizardStep::Timeline));
    errors.into_result()?;

    form.build_plan(admin_id)
}

/// Check a batch selection before linking: non-empty, no duplicates.
pub fn validate_selection(document_ids: &[DbId]) -> Result<(), CoreError> {
    if document_ids.is_empty() {
        return Err(CoreError::Validation(
            "At least one document must be selected".to_string(),
        ));
    }
    let mut sorted = document_ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != document_ids.len() {
        return Err(CoreError::Validation(
            "Each document may only be selected once".to_string(),
        ));
    }
    Ok(())
}

/// The client shared by every selected document's uploader.
///
/// A batch may not span several clients, nor mix client uploads with
/// uploads from profiles that have no client.
pub fn common_client<I>(uploader_clients: I) -> Result<Option<DbId>, CoreError>
where
    I: IntoIterator<Item = Option<DbId>>,
{
    let mut clients = uploader_clients.into_iter();
    let Some(first) = clients.next() else {
        return Ok(None);
    };
    if clients.any(|c| c != first) {
        return Err(CoreError::Conflict(
            "Selected documents were uploaded by different clients".to_string(),
        ));
    }
    Ok(first)
}

/// Client for a project created from a batch: the explicit choice, or the
/// uploaders' client when none is given. An explicit client must agree with
/// the uploaders' client.
pub fn resolve_client(
    explicit: Option<DbId>,
    uploaders: Option<DbId>,
) -> Result<Option<DbId>, CoreError> {
    match (explicit, uploaders) {
        (Some(chosen), Some(owner)) if chosen != owner => Err(CoreError::Conflict(format!(
            "Selected documents belong to client {owner}, not client {chosen}"
        ))),
        (Some(chosen), _) => Ok(Some(chosen)),
        (None, owner) => Ok(owner),
    }
}
