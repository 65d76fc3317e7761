//! Request handlers, one module per resource.
//!
//! Handlers check access, delegate persistence to the `slf_db` repositories,
//! publish workflow events after writes commit, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod client;
pub mod document;
pub mod inspection;
pub mod lookups;
pub mod notification;
pub mod phases;
pub mod profile;
pub mod project;
pub mod team;
pub mod triage;
