//! Post repository.
//!
//! All reads and mutations are scoped to the owning user. "Check
//! existence, then act" sequencing is used throughout; it is not atomic
//! against concurrent requests, which is accepted here.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::db::models::{Post, PostStatus, Schedule, ScheduleStatus};
use crate::error::{Error, Result};

/// Input for creating a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub content: String,
    pub media_urls: Vec<String>,
    pub social_account_id: Option<String>,
    /// Desired future publication time and timezone
    pub schedule: Option<(DateTime<Utc>, String)>,
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub content: Option<String>,
    pub media_urls: Option<Vec<String>>,
    pub schedule: Option<(DateTime<Utc>, String)>,
}

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, new: NewPost) -> Result<Post> {
        let now = Utc::now();
        let schedule = new.schedule.map(|(scheduled_for, timezone)| Schedule {
            scheduled_for,
            timezone,
            status: ScheduleStatus::Pending,
        });
        let status = if schedule.is_some() {
            PostStatus::Scheduled
        } else {
            PostStatus::Draft
        };

        let post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: new.content,
            media_urls: new.media_urls,
            social_account_id: new.social_account_id,
            status,
            schedule,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO posts
                (id, user_id, content, media_urls, social_account_id, status,
                 scheduled_for, timezone, schedule_status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&post.id)
        .bind(&post.user_id)
        .bind(&post.content)
        .bind(encode_media_urls(&post.media_urls)?)
        .bind(&post.social_account_id)
        .bind(post.status.as_str())
        .bind(post.schedule.as_ref().map(|s| s.scheduled_for))
        .bind(post.schedule.as_ref().map(|s| s.timezone.clone()))
        .bind(post.schedule.as_ref().map(|s| s.status.as_str()))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    /// The owner's posts, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT * FROM posts WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_post).collect()
    }

    /// A post visible to its owner. Returns `None` both for absent posts
    /// and posts owned by someone else.
    pub async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(row_to_post).transpose()
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        changes: PostChanges,
    ) -> Result<Post> {
        let mut post = self
            .find_for_user(id, user_id)
            .await?
            .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;

        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(media_urls) = changes.media_urls {
            post.media_urls = media_urls;
        }
        if let Some((scheduled_for, timezone)) = changes.schedule {
            post.schedule = Some(Schedule {
                scheduled_for,
                timezone,
                status: ScheduleStatus::Pending,
            });
            post.status = PostStatus::Scheduled;
        }
        post.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE posts
            SET content = ?1, media_urls = ?2, status = ?3,
                scheduled_for = ?4, timezone = ?5, schedule_status = ?6,
                updated_at = ?7
            WHERE id = ?8 AND user_id = ?9
            "#,
        )
        .bind(&post.content)
        .bind(encode_media_urls(&post.media_urls)?)
        .bind(post.status.as_str())
        .bind(post.schedule.as_ref().map(|s| s.scheduled_for))
        .bind(post.schedule.as_ref().map(|s| s.timezone.clone()))
        .bind(post.schedule.as_ref().map(|s| s.status.as_str()))
        .bind(post.updated_at)
        .bind(&post.id)
        .bind(&post.user_id)
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Post not found".to_string()));
        }

        Ok(())
    }
}

fn encode_media_urls(urls: &[String]) -> Result<String> {
    serde_json::to_string(urls)
        .map_err(|e| Error::Internal(format!("media_urls serialization failed: {e}")))
}

fn row_to_post(row: SqliteRow) -> Result<Post> {
    let media_urls: String = row.try_get("media_urls")?;
    let media_urls: Vec<String> = serde_json::from_str(&media_urls)
        .map_err(|e| Error::Internal(format!("corrupt media_urls column: {e}")))?;

    let status: String = row.try_get("status")?;
    let status = PostStatus::parse(&status)
        .ok_or_else(|| Error::Internal(format!("unknown post status: {status}")))?;

    let scheduled_for: Option<DateTime<Utc>> = row.try_get("scheduled_for")?;
    let schedule = match scheduled_for {
        Some(scheduled_for) => {
            let timezone: Option<String> = row.try_get("timezone")?;
            let schedule_status: Option<String> = row.try_get("schedule_status")?;
            let status = schedule_status
                .as_deref()
                .and_then(ScheduleStatus::parse)
                .unwrap_or(ScheduleStatus::Pending);
            Some(Schedule {
                scheduled_for,
                timezone: timezone.unwrap_or_else(|| "UTC".to_string()),
                status,
            })
        }
        None => None,
    };

    Ok(Post {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        content: row.try_get("content")?,
        media_urls,
        social_account_id: row.try_get("social_account_id")?,
        status,
        schedule,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
