//! Repository for the `profiles` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile};

const COLUMNS: &str =
    "id, full_name, email, role, specialization, client_id, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (full_name, email, role, specialization, client_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.specialization)
            .bind(input.client_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles ordered by name, optionally restricted to one role.
    pub async fn list(pool: &PgPool, role: Option<&str>) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles \
             WHERE ($1::text IS NULL OR role = $1) \
             ORDER BY full_name, id"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }
}
