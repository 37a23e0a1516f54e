use std::sync::Arc;

use anyhow::Context;
use tracing::warn;

use postcraft::auth::{JwtConfig, JwtKeys};
use postcraft::content::{ContentGenerator, ImageGenerator};
use postcraft::db::Database;
use postcraft::http_server::{self, AppState};
use postcraft::llm::{ChatCompletion, ImageGeneration, OpenAiProvider};
use postcraft::{AppConfig, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init(&config.server.log_level);

    let database = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database
        .run_migrations()
        .await
        .context("failed to run migrations")?;

    // Construct the OpenAI client once iff a key is configured and inject
    // it; without one the content generator runs on templates and image
    // generation reports unavailability.
    let (chat, images): (
        Option<Arc<dyn ChatCompletion>>,
        Option<Arc<dyn ImageGeneration>>,
    ) = match config.openai.llm_config() {
        Some(llm_config) => {
            let provider = Arc::new(
                OpenAiProvider::new(llm_config).context("failed to build OpenAI provider")?,
            );
            (Some(provider.clone()), Some(provider))
        }
        None => {
            warn!(
                "OPENAI_API_KEY not set; content generation will use fallback templates \
                 and image generation is unavailable"
            );
            (None, None)
        }
    };

    let jwt = JwtKeys::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_secs,
    ));

    let state = AppState::new(
        &database,
        ContentGenerator::new(chat),
        ImageGenerator::new(images),
        jwt,
    );

    http_server::serve(state, &config.server.bind_addr)
        .await
        .context("server exited with error")?;

    Ok(())
}
