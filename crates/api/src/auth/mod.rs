//! Bearer-token authentication.
//!
//! Tokens are issued by the external identity provider and signed with a
//! shared HS256 secret; this service only validates them.

pub mod jwt;
