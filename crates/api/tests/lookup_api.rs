//! Integration tests for the public status, workflow and wizard lookups.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_statuses_are_listed_in_pipeline_order(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/statuses/projects").await).await;

    let statuses = json["data"].as_array().unwrap();
    assert_eq!(statuses.len(), 12);
    assert_eq!(statuses[0]["status"], "draft");
    assert_eq!(statuses[0]["progress"], 10);
    assert_eq!(statuses[0]["allowed_next"], json!(["submitted", "cancelled"]));
    assert_eq!(statuses[11]["status"], "cancelled");
    assert_eq!(statuses[11]["allowed_next"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_project_status_falls_back(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/statuses/projects/archived").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["label"], "archived");
    assert_eq!(json["data"]["known"], false);
    assert_eq!(json["data"]["progress"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn known_project_status_has_display_metadata(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/statuses/projects/government_submitted").await).await;

    assert_eq!(json["data"]["label"], "Submitted to Government");
    assert_eq!(json["data"]["progress"], 90);
    assert_eq!(json["data"]["known"], true);
    assert_eq!(json["data"]["allowed_next"], json!(["slf_issued", "cancelled"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn document_statuses_have_no_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/statuses/documents/approved_by_pl").await).await;

    assert_eq!(json["data"]["known"], true);
    assert!(json["data"].get("progress").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn next_allowed_follows_lead_table(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/workflow/next-allowed/inspection_scheduled").await).await;
    assert_eq!(json["data"]["status"], "inspection_scheduled");
    let mut next: Vec<String> =
        serde_json::from_value(json["data"]["next_allowed"].clone()).unwrap();
    next.sort();
    assert_eq!(next, vec!["cancelled", "inspection_in_progress"]);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/workflow/next-allowed/whatever").await).await;
    assert_eq!(json["data"]["next_allowed"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wizard_step_reports_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/wizard/validate",
        json!({ "form": { "name": "AB" }, "step": 0 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], false);
    assert!(json["data"]["errors"]["name"].is_string());
    assert!(json["data"]["errors"]["application_type"].is_string());
    assert!(json["data"]["errors"]["location"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wizard_blocks_advancing_past_incomplete_step(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let json = body_json(
        post_json(
            app,
            "/api/v1/wizard/validate",
            json!({ "form": {}, "step": 1, "next_step": 2 }),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["transition"]["allowed"], false);

    let app = common::build_test_app(pool);
    let json = body_json(
        post_json(
            app,
            "/api/v1/wizard/validate",
            json!({ "form": {}, "step": 1, "next_step": 0 }),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["transition"]["allowed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wizard_accepts_complete_details(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(
        post_json(
            app,
            "/api/v1/wizard/validate",
            json!({
                "form": {
                    "name": "Gedung Serbaguna",
                    "application_category": "SLF",
                    "application_type": "SLF_BARU",
                    "location": "Jl. Merdeka 45"
                },
                "step": 0
            }),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["valid"], true);
    assert_eq!(json["data"]["errors"], json!({}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wizard_rejects_unknown_step(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/wizard/validate",
        json!({ "form": {}, "step": 9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn phase_defaults_sum_to_default_timeline(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/wizard/phase-defaults").await).await;

    assert_eq!(json["data"]["phases"].as_array().unwrap().len(), 5);
    assert_eq!(json["data"]["total_days"], 43);
    assert_eq!(json["data"]["min_days"], 1);
    assert_eq!(json["data"]["max_days"], 365);
}
