//! Provider configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::llm::error::{LlmError, LlmResult};

/// Settings for the OpenAI-backed provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key, never logged or serialized
    pub api_key: SecretString,
    /// Chat-completion model
    pub model: String,
    /// Image-generation model
    pub image_model: String,
    /// Default sampling temperature
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into_boxed_str()),
            model: model.into(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.7,
        }
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn validate(&self) -> LlmResult<()> {
        if self.api_key.expose_secret().is_empty() {
            return Err(LlmError::Config("API key must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::Config(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        Ok(())
    }
}
