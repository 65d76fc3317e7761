//! Repository for the `clients` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};

const COLUMNS: &str =
    "id, name, company_name, email, phone, address, created_by, created_at, updated_at";

pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, company_name, email, phone, address, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.company_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name, id");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Clients the admin created or administers a project for.
    pub async fn list_for_admin(pool: &PgPool, admin_id: DbId) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients \
             WHERE id = ANY(SELECT id FROM clients WHERE created_by = $1 \
                            UNION \
                            SELECT client_id FROM projects \
                            WHERE admin_lead_id = $1 AND client_id IS NOT NULL) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(admin_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of the clients returned by [`Self::list_for_admin`].
    pub async fn ids_for_admin(pool: &PgPool, admin_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM clients WHERE created_by = $1 \
             UNION \
             SELECT client_id FROM projects WHERE admin_lead_id = $1 AND client_id IS NOT NULL \
             ORDER BY 1",
        )
        .bind(admin_id)
        .fetch_all(pool)
        .await
    }
}
