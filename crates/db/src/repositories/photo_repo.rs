//! Repository for the `inspection_photos` table.

use slf_core::types::DbId;
use sqlx::PgPool;

use crate::models::inspection::{CreateInspectionPhoto, InspectionPhoto};

const COLUMNS: &str = "id, inspection_id, checklist_item_id, photo_url, latitude, longitude, \
     uploaded_by, uploaded_at";

pub struct PhotoRepo;

impl PhotoRepo {
    pub async fn create(
        pool: &PgPool,
        inspection_id: DbId,
        uploaded_by: DbId,
        input: &CreateInspectionPhoto,
    ) -> Result<InspectionPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspection_photos \
                (inspection_id, checklist_item_id, photo_url, latitude, longitude, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionPhoto>(&query)
            .bind(inspection_id)
            .bind(&input.checklist_item_id)
            .bind(&input.photo_url)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_inspection(
        pool: &PgPool,
        inspection_id: DbId,
    ) -> Result<Vec<InspectionPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inspection_photos WHERE inspection_id = $1 ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, InspectionPhoto>(&query)
            .bind(inspection_id)
            .fetch_all(pool)
            .await
    }
}
