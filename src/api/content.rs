//! Content and image generation endpoints.
//!
//! These do not require authentication; identity only matters where
//! records are created (see [`crate::api::posts`]).

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::api::ValidatedJson;
use crate::content::{ContentRequest, ImageRequest};
use crate::error::Result;
use crate::http_server::AppState;

/// POST /api/content/generate
///
/// Always answers with usable copy for a valid request: external faults
/// degrade to template generation, flagged by the `warning` field.
pub async fn generate_content(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContentRequest>,
) -> Result<impl IntoResponse> {
    info!(
        platform = request.platform.as_str(),
        tone = request.tone.as_str(),
        "generating content"
    );

    let content = state.content.generate(&request).await;
    Ok(Json(content))
}

/// POST /api/content/image
pub async fn generate_image(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ImageRequest>,
) -> Result<impl IntoResponse> {
    info!("generating image");

    let image = state.images.generate(&request).await?;
    Ok(Json(image))
}
