//! Repository for the `checklist_responses` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::inspection::{ChecklistResponse, UpsertChecklistResponse};

const COLUMNS: &str = "id, inspection_id, item_id, template_id, response, responded_by, \
     responded_at, photogeotag_data";

pub struct ChecklistRepo;

impl ChecklistRepo {
    /// Insert or replace the answer for one checklist item.
    pub async fn upsert(
        pool: &PgPool,
        inspection_id: DbId,
        item_id: &str,
        responded_by: DbId,
        input: &UpsertChecklistResponse,
    ) -> Result<ChecklistResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO checklist_responses \
                (inspection_id, item_id, template_id, response, responded_by, photogeotag_data) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT ON CONSTRAINT uq_checklist_responses_item DO UPDATE SET \
                template_id = EXCLUDED.template_id, \
                response = EXCLUDED.response, \
                responded_by = EXCLUDED.responded_by, \
                responded_at = NOW(), \
                photogeotag_data = EXCLUDED.photogeotag_data \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChecklistResponse>(&query)
            .bind(inspection_id)
            .bind(item_id)
            .bind(&input.template_id)
            .bind(&input.response)
            .bind(responded_by)
            .bind(&input.photogeotag_data)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<ChecklistResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM checklist_responses WHERE inspection_id = $1 ORDER BY item_id"
        );
        sqlx::query_as::<_, ChecklistResponse>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
