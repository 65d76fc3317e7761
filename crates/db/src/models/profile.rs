//! User profile model. Identities are issued externally; profiles carry the
//! role and client association used for authorization.

use serde::{Deserialize, Serialize};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub specialization: Option<String>,
    pub client_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO used when provisioning a profile for an external identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub specialization: Option<String>,
    pub client_id: Option<DbId>,
}
