//! Repository for the `inspections` table.

use slf_core::inspection::InspectionStatus;
use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::inspection::{CreateInspection, Inspection};

const COLUMNS: &str = "id, project_id, inspector_id, scheduled_date, start_time, end_time, \
     status, notes, completed_at, created_at, updated_at";

pub struct InspectionRepo;

impl InspectionRepo {
    /// Schedule an inspection. New inspections start as `scheduled`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateInspection,
    ) -> Result<Inspection, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspections \
                (project_id, inspector_id, scheduled_date, start_time, end_time, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(project_id)
            .bind(input.inspector_id)
            .bind(input.scheduled_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inspections WHERE id = $1");
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Inspection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspections \
             WHERE project_id = $1 \
             ORDER BY scheduled_date, start_time NULLS LAST, id"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-set the inspection status. Moving to `completed` stamps
    /// `completed_at`.
    ///
    /// Returns `None` when the row is missing or its status has changed.
    pub async fn update_status_if(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        next: &str,
    ) -> Result<Option<Inspection>, sqlx::Error> {
        let query = format!(
            "UPDATE inspections SET \
                status = $3, \
                completed_at = CASE WHEN $3::text = $4::text THEN NOW() ELSE completed_at END \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inspection>(&query)
            .bind(id)
            .bind(expected)
            .bind(next)
            .bind(InspectionStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }
}
