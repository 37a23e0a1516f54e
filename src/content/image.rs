//! Image generator.
//!
//! A single external call with no fallback: a missing provider is a
//! configuration error the caller must surface, and a service fault
//! propagates as a generation failure.

use std::sync::Arc;

use tracing::warn;

use crate::content::types::{GeneratedImage, ImageRequest};
use crate::error::{Error, Result};
use crate::llm::{ImageGeneration, LlmError};

pub struct ImageGenerator {
    provider: Option<Arc<dyn ImageGeneration>>,
}

impl ImageGenerator {
    pub fn new(provider: Option<Arc<dyn ImageGeneration>>) -> Self {
        Self { provider }
    }

    /// Generate exactly one image for the prompt.
    pub async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            Error::Configuration(
                "The OpenAI API key is missing or invalid. Cannot generate images without an API key."
                    .to_string(),
            )
        })?;

        let image_url = provider
            .generate_image(&request.prompt)
            .await
            .map_err(|e| {
                warn!(error = %e, provider = provider.name(), "image generation failed");
                match e {
                    LlmError::Config(message) => Error::Configuration(message),
                    other => Error::GenerationService(other.to_string()),
                }
            })?;

        Ok(GeneratedImage {
            image_url,
            prompt: request.prompt.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmResult;
    use async_trait::async_trait;

    struct UrlProvider(&'static str);

    #[async_trait]
    impl ImageGeneration for UrlProvider {
        async fn generate_image(&self, _prompt: &str) -> LlmResult<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct EmptyProvider;

    #[async_trait]
    impl ImageGeneration for EmptyProvider {
        async fn generate_image(&self, _prompt: &str) -> LlmResult<String> {
            Err(LlmError::EmptyResponse(
                "image response contained no URL".to_string(),
            ))
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    fn request() -> ImageRequest {
        ImageRequest {
            prompt: "a red bicycle".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_provider_is_configuration_error() {
        let generator = ImageGenerator::new(None);
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_missing_url_is_service_error() {
        let generator = ImageGenerator::new(Some(Arc::new(EmptyProvider)));
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, Error::GenerationService(_)));
    }

    #[tokio::test]
    async fn test_successful_generation_echoes_prompt() {
        let generator = ImageGenerator::new(Some(Arc::new(UrlProvider(
            "https://images.example/bicycle.png",
        ))));
        let image = generator.generate(&request()).await.unwrap();
        assert_eq!(image.image_url, "https://images.example/bicycle.png");
        assert_eq!(image.prompt, "a red bicycle");
    }
}
