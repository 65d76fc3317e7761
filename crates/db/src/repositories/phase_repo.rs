//! Repository for the `project_phases` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::phase::{ProjectPhase, UpdatePhase};

const COLUMNS: &str = "id, project_id, phase_number, phase_name, estimated_duration, status, \
     order_index, created_at, updated_at";

pub struct PhaseRepo;

impl PhaseRepo {
    /// Phases of a project in execution order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectPhase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases WHERE project_id = $1 ORDER BY order_index"
        );
        sqlx::query_as::<_, ProjectPhase>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update one phase. A new duration is mirrored into
    /// `projects.phase_durations` under `phase_key` in the same transaction.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        phase_number: i16,
        phase_key: &str,
        input: &UpdatePhase,
    ) -> Result<Option<ProjectPhase>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE project_phases SET \
                estimated_duration = COALESCE($3, estimated_duration), \
                status = COALESCE($4, status) \
             WHERE project_id = $1 AND phase_number = $2 \
             RETURNING {COLUMNS}"
        );
        let Some(phase) = sqlx::query_as::<_, ProjectPhase>(&query)
            .bind(project_id)
            .bind(phase_number)
            .bind(input.estimated_duration)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(days) = input.estimated_duration {
            sqlx::query(
                "UPDATE projects SET \
                    phase_durations = jsonb_set(phase_durations, ARRAY[$2::text], to_jsonb($3::int)) \
                 WHERE id = $1",
            )
            .bind(project_id)
            .bind(phase_key)
            .bind(days)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(phase))
    }
}
