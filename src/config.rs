//! Service configuration.
//!
//! Layered loading in the usual order: built-in defaults, then an optional
//! TOML file, then `APP_`-prefixed environment variables, then a handful of
//! well-known direct variables (`DATABASE_URL`, `OPENAI_API_KEY`, ...) for
//! compatibility with container setups.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::llm::LlmConfig;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Fixed number of connection attempts at startup
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
    /// Fixed delay between attempts, in seconds
    #[serde(default = "default_connect_retry_secs")]
    pub connect_retry_secs: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 signing secret; generated per process when not configured,
    /// which invalidates tokens across restarts
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_token_expiration")]
    pub token_expiration_secs: u64,
}

/// Settings for the external generation collaborator.
///
/// The API key is optional: without it the content generator runs in
/// fallback mode and image generation is unavailable.
#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAiConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "sqlite://postcraft.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_attempts() -> u32 {
    5
}

fn default_connect_retry_secs() -> u64 {
    2
}

fn default_jwt_secret() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_token_expiration() -> u64 {
    3600
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_attempts: default_connect_attempts(),
            connect_retry_secs: default_connect_retry_secs(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_expiration_secs: default_token_expiration(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            image_model: default_image_model(),
            temperature: default_temperature(),
        }
    }
}

impl OpenAiConfig {
    /// Provider configuration, present only when an API key is configured.
    pub fn llm_config(&self) -> Option<LlmConfig> {
        self.api_key.as_ref().map(|key| LlmConfig {
            api_key: key.clone(),
            model: self.model.clone(),
            image_model: self.image_model.clone(),
            temperature: self.temperature,
        })
    }
}

impl AppConfig {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut settings = config::Config::builder();

        // Optional config file, first match wins
        let config_paths = ["postcraft.toml", "config.toml", "config/postcraft.toml"];
        for path in &config_paths {
            if std::path::Path::new(path).exists() {
                settings = settings.add_source(config::File::with_name(path));
                break;
            }
        }

        // APP_SERVER__BIND_ADDR style overrides
        settings = settings.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: AppConfig = settings.build()?.try_deserialize()?;

        // Well-known direct variables take precedence
        if let Ok(url) = std::env::var("DATABASE_URL") {
            loaded.database.url = url;
        }
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            loaded.server.bind_addr = addr;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            loaded.auth.jwt_secret = secret;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                loaded.openai.api_key = Some(SecretString::new(key.into_boxed_str()));
            }
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            loaded.openai.model = model;
        }

        Ok(loaded)
    }
}
