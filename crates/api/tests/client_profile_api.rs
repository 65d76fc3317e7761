//! Integration tests for clients and profile lookups.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, seed_cast, seed_profile, token_for};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_and_lists_own_clients(pool: PgPool) {
    let cast = seed_cast(&pool).await;
    let admin = token_for(cast.admin, "admin_lead");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/clients",
        json!({ "name": "CV Maju", "email": "not-an-email" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["email"].is_string());

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/clients",
        json!({ "name": "CV Maju", "email": "kantor@cvmaju.test" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(common::build_test_app(pool.clone()), "/api/v1/clients", &admin).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let other = seed_profile(&pool, "Bima Admin", "admin_lead", None).await;
    let other = token_for(other, "admin_lead");
    let json = body_json(get_auth(common::build_test_app(pool.clone()), "/api/v1/clients", &other).await).await;
    assert_eq!(json["data"], json!([]));

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/clients/{}", cast.client),
        &other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_user_reads_only_its_own_client(pool: PgPool) {
    let cast = seed_cast(&pool).await;
    let owner = seed_profile(&pool, "Citra Client", "client", Some(cast.client)).await;
    let owner = token_for(owner, "client");

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/clients/{}", cast.client),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(common::build_test_app(pool), "/api/v1/clients", &owner).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profiles_filter_by_role(pool: PgPool) {
    let cast = seed_cast(&pool).await;
    let lead = token_for(cast.lead, "project_lead");

    let json = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/profiles?role=inspector",
            &lead,
        )
        .await,
    )
    .await;
    let profiles = json["data"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], cast.inspector);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/profiles?role=wizard",
        &lead,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get_auth(common::build_test_app(pool.clone()), "/api/v1/profiles/me", &lead).await).await;
    assert_eq!(json["data"]["full_name"], "Lukas Lead");

    let client = seed_profile(&pool, "Citra Client", "client", Some(cast.client)).await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/profiles",
        &token_for(client, "client"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
