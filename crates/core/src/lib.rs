//! Domain layer for the SLF/PBG certification workflow.
//!
//! Everything in this crate is pure: status vocabularies, transition rules,
//! wizard validation, phase planning, document triage grouping and
//! inspection evidence checks. The database and HTTP crates build on it.

pub mod application;
pub mod document;
pub mod error;
pub mod event_types;
pub mod evidence;
pub mod inspection;
pub mod phases;
pub mod project_status;
pub mod roles;
pub mod triage;
pub mod types;
pub mod wizard;
pub mod workflow;
