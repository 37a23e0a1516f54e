//! SQLite-backed persistence.

pub mod models;
pub mod posts;
pub mod users;

pub use posts::PostRepository;
pub use users::UserRepository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect with a fixed number of attempts and a fixed delay between
    /// them. No backoff.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(Error::Database)?
            .create_if_missing(true);

        let mut attempt = 1;
        let pool = loop {
            match SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options.clone())
                .await
            {
                Ok(pool) => break pool,
                Err(e) if attempt < config.connect_attempts => {
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = config.connect_attempts,
                        "database connection failed; retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(config.connect_retry_secs)).await;
                    attempt += 1;
                }
                Err(e) => return Err(Error::Database(e)),
            }
        };

        info!(url = %config.url, "database connected");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema.
    pub async fn run_migrations(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                content TEXT NOT NULL,
                media_urls TEXT NOT NULL,
                social_account_id TEXT,
                status TEXT NOT NULL,
                scheduled_for TEXT,
                timezone TEXT,
                schedule_status TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
        ];

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
