//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- `admin_lead` or `superadmin`.
//! - [`rbac::RequireReviewer`] -- roles that review project work.
//! - [`rbac::RequireStaff`] -- any role except `client`.

pub mod auth;
pub mod rbac;
