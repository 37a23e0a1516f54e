//! Shared test helpers: an app wired to an in-memory database with no
//! external providers configured.

// Not every test binary uses every helper
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use postcraft::auth::{JwtConfig, JwtKeys};
use postcraft::content::{ContentGenerator, ImageGenerator};
use postcraft::db::Database;
use postcraft::http_server::{router, AppState};

pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let database = Database::from_pool(pool);
    database.run_migrations().await.expect("migrations");

    let state = AppState::new(
        &database,
        ContentGenerator::new(None),
        ImageGenerator::new(None),
        JwtKeys::new(JwtConfig::new("test-secret", 3600)),
    );

    router(state)
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, json)
}

/// Register a user and return an access token for them.
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/register",
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        Some(serde_json::json!({
            "email": email,
            "password": "password123",
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["accessToken"].as_str().expect("access token").to_string()
}
