//! Post CRUD endpoints. All operations are scoped to the authenticated
//! caller; posts owned by other users are indistinguishable from absent
//! ones.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::api::ValidatedJson;
use crate::auth::CurrentUser;
use crate::db::posts::{NewPost, PostChanges};
use crate::error::{Error, Result};
use crate::http_server::AppState;

const DEFAULT_TIMEZONE: &str = "UTC";

fn validate_media_urls(urls: &Vec<String>) -> std::result::Result<(), ValidationError> {
    for url in urls {
        if url::Url::parse(url).is_err() {
            let mut error = ValidationError::new("url");
            error.message = Some(format!("invalid media URL: {url}").into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    #[serde(default)]
    #[validate(custom(function = validate_media_urls))]
    pub media_urls: Option<Vec<String>>,
    #[serde(default)]
    pub social_account_id: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_media_urls))]
    pub media_urls: Option<Vec<String>>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse> {
    // A schedule only makes sense with an account to publish through
    if request.scheduled_for.is_some() && request.social_account_id.is_none() {
        return Err(Error::validation(
            "socialAccountId",
            "Social account is required for scheduled posts",
        ));
    }

    let schedule = request.scheduled_for.map(|at| {
        (
            at,
            request
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        )
    });

    let post = state
        .posts
        .create(
            &user.id,
            NewPost {
                content: request.content,
                media_urls: request.media_urls.unwrap_or_default(),
                social_account_id: request.social_account_id,
                schedule,
            },
        )
        .await?;

    info!(user_id = %user.id, post_id = %post.id, status = post.status.as_str(), "post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse> {
    let posts = state.posts.list_for_user(&user.id).await?;
    Ok(Json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let post = state
        .posts
        .find_for_user(&id, &user.id)
        .await?
        .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<impl IntoResponse> {
    if request.scheduled_for.is_some() {
        let existing = state
            .posts
            .find_for_user(&id, &user.id)
            .await?
            .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;
        if existing.social_account_id.is_none() {
            return Err(Error::validation(
                "socialAccountId",
                "Social account is required for scheduled posts",
            ));
        }
    }

    let schedule = request.scheduled_for.map(|at| {
        (
            at,
            request
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        )
    });

    let post = state
        .posts
        .update(
            &id,
            &user.id,
            PostChanges {
                content: request.content,
                media_urls: request.media_urls,
                schedule,
            },
        )
        .await?;

    info!(user_id = %user.id, post_id = %post.id, "post updated");

    Ok(Json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.posts.delete(&id, &user.id).await?;

    info!(user_id = %user.id, post_id = %id, "post deleted");

    Ok(StatusCode::NO_CONTENT)
}
