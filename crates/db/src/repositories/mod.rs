//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod checklist_repo;
pub mod client_repo;
pub mod document_repo;
pub mod inspection_repo;
pub mod notification_repo;
pub mod phase_repo;
pub mod photo_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod team_repo;
pub mod triage_repo;

pub use checklist_repo::ChecklistRepo;
pub use client_repo::ClientRepo;
pub use document_repo::DocumentRepo;
pub use inspection_repo::InspectionRepo;
pub use notification_repo::NotificationRepo;
pub use phase_repo::PhaseRepo;
pub use photo_repo::PhotoRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use team_repo::TeamRepo;
pub use triage_repo::TriageRepo;
