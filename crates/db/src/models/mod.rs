//! Row models and input DTOs, one module per table family.

pub mod client;
pub mod document;
pub mod inspection;
pub mod notification;
pub mod phase;
pub mod profile;
pub mod project;
pub mod team;
