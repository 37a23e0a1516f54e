//! HTTP server assembly.

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::api;
use crate::auth::{JwtKeys, PasswordHasher};
use crate::content::{ContentGenerator, ImageGenerator};
use crate::db::{Database, PostRepository, UserRepository};
use crate::error::Result;

/// Shared handler state
#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: UserRepository,
    pub posts: PostRepository,
    pub content: Arc<ContentGenerator>,
    pub images: Arc<ImageGenerator>,
    pub jwt: JwtKeys,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(
        database: &Database,
        content: ContentGenerator,
        images: ImageGenerator,
        jwt: JwtKeys,
    ) -> Self {
        Self {
            users: UserRepository::new(database.pool().clone()),
            posts: PostRepository::new(database.pool().clone()),
            content: Arc::new(content),
            images: Arc::new(images),
            jwt,
            hasher: PasswordHasher::new(),
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/me", get(api::auth::me));

    let content_routes = Router::new()
        .route("/generate", post(api::content::generate_content))
        .route("/image", post(api::content::generate_image));

    let post_routes = Router::new()
        .route("/", post(api::posts::create_post).get(api::posts::list_posts))
        .route(
            "/{id}",
            get(api::posts::get_post)
                .patch(api::posts::update_post)
                .delete(api::posts::delete_post),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes)
        .nest("/api/content", content_routes)
        .nest("/api/posts", post_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve until the listener fails.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = router(state);

    info!("starting HTTP server on {addr}");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::Error::Internal(format!("failed to bind {addr}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::Internal(format!("server error: {e}")))?;

    Ok(())
}
