#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use slf_api::auth::jwt::{generate_access_token, JwtConfig};
use slf_api::config::ServerConfig;
use slf_api::router::build_app_router;
use slf_api::state::AppState;
use slf_core::types::DbId;
use slf_db::models::client::CreateClient;
use slf_db::models::profile::CreateProfile;
use slf_db::repositories::{ClientRepo, ProfileRepo};
use slf_events::EventBus;

pub const TEST_JWT_SECRET: &str = "test-secret-do-not-use-in-production";

/// Test `ServerConfig` with dev defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application exactly as `main.rs` does, returning the event
/// bus so tests can subscribe to what handlers publish.
pub fn build_test_app_with_bus(pool: PgPool) -> (Router, Arc<EventBus>) {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    (build_app_router(state, &config), event_bus)
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool).0
}

/// Mint an access token the way the identity provider would.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token signing")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn seed_profile(pool: &PgPool, name: &str, role: &str, client_id: Option<DbId>) -> DbId {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            full_name: name.to_string(),
            email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
            role: role.to_string(),
            specialization: None,
            client_id,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_client(pool: &PgPool, name: &str, created_by: DbId) -> DbId {
    ClientRepo::create(
        pool,
        created_by,
        &CreateClient {
            name: name.to_string(),
            company_name: None,
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// An admin lead, a client, a project lead and an inspector.
pub struct Cast {
    pub admin: DbId,
    pub client: DbId,
    pub lead: DbId,
    pub inspector: DbId,
}

pub async fn seed_cast(pool: &PgPool) -> Cast {
    let admin = seed_profile(pool, "Ayu Admin", "admin_lead", None).await;
    let client = seed_client(pool, "PT Bangun Jaya", admin).await;
    let lead = seed_profile(pool, "Lukas Lead", "project_lead", None).await;
    let inspector = seed_profile(pool, "Indra Inspector", "inspector", None).await;
    Cast {
        admin,
        client,
        lead,
        inspector,
    }
}

/// A complete wizard form for the seeded cast.
pub fn project_form(cast: &Cast) -> Value {
    serde_json::json!({
        "name": "Gedung Serbaguna",
        "application_type": "SLF_BARU",
        "location": "Jl. Merdeka 45",
        "city": "Bandung",
        "client_id": cast.client,
        "project_lead_id": cast.lead,
        "inspector_ids": [cast.inspector],
    })
}

/// Create a project through the API as the cast's admin; returns its id.
pub async fn create_project(app: Router, cast: &Cast) -> DbId {
    let token = token_for(cast.admin, "admin_lead");
    let response = post_json_auth(app, "/api/v1/projects", project_form(cast), &token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
