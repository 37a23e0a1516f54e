//! Capability traits for the external generation services.
//!
//! Handlers and generators depend on these, not on a concrete client, so
//! any backing service can be substituted behind the same contract. Both
//! capabilities may be unconfigured at runtime; callers hold
//! `Option<Arc<dyn ...>>` and decide what an absent provider means.

use async_trait::async_trait;

use crate::llm::error::LlmResult;
use crate::llm::types::ChatRequest;

pub mod openai;

/// Complete a structured chat-style request, returning the raw text of the
/// first choice.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> LlmResult<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Generate one image from a prompt, returning its URL.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> LlmResult<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
