//! Inspections, checklist answers, and inspection photos.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use slf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub project_id: DbId,
    pub inspector_id: DbId,
    pub scheduled_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: String,
    pub notes: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInspection {
    pub inspector_id: DbId,
    pub scheduled_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

/// A row from the `checklist_responses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistResponse {
    pub id: DbId,
    pub inspection_id: DbId,
    pub item_id: String,
    pub template_id: Option<String>,
    pub response: serde_json::Value,
    pub responded_by: DbId,
    pub responded_at: Timestamp,
    pub photogeotag_data: Option<serde_json::Value>,
}

/// Answer to one checklist item. Re-answering replaces the previous answer.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertChecklistResponse {
    pub template_id: Option<String>,
    pub response: serde_json::Value,
    pub photogeotag_data: Option<serde_json::Value>,
}

/// A row from the `inspection_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InspectionPhoto {
    pub id: DbId,
    pub inspection_id: DbId,
    pub checklist_item_id: Option<String>,
    pub photo_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInspectionPhoto {
    pub checklist_item_id: Option<String>,
    pub photo_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
