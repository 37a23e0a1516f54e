//! Content generator.
//!
//! Prefers a live chat-completion call; any configuration or service fault
//! is absorbed and the deterministic templates take over, so a valid topic
//! always yields usable copy.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::content::fallback;
use crate::content::types::{ContentRequest, GeneratedContent, Platform};
use crate::llm::{ChatCompletion, ChatRequest, LlmError, LlmResult, Message};

/// Shape the external service is asked to return
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionPayload {
    main_content: String,
    #[serde(default)]
    hashtags: Vec<String>,
    #[serde(default)]
    suggested_image_prompt: Option<String>,
}

pub struct ContentGenerator {
    provider: Option<Arc<dyn ChatCompletion>>,
}

impl ContentGenerator {
    /// A generator with no provider runs every request through the
    /// fallback templates; that is a supported mode, not an error.
    pub fn new(provider: Option<Arc<dyn ChatCompletion>>) -> Self {
        Self { provider }
    }

    /// Generate post copy. Never fails once the request has passed
    /// validation: service and parse faults degrade to templates.
    pub async fn generate(&self, request: &ContentRequest) -> GeneratedContent {
        let Some(provider) = &self.provider else {
            debug!(
                platform = request.platform.as_str(),
                "no chat provider configured; using fallback templates"
            );
            return fallback::generate(request);
        };

        match self.complete_external(provider.as_ref(), request).await {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    error = %e,
                    provider = provider.name(),
                    platform = request.platform.as_str(),
                    "external content generation failed; using fallback templates"
                );
                fallback::generate(request)
            }
        }
    }

    async fn complete_external(
        &self,
        provider: &dyn ChatCompletion,
        request: &ContentRequest,
    ) -> LlmResult<GeneratedContent> {
        let chat = ChatRequest::new(vec![
            Message::system(system_prompt(request.platform)),
            Message::user(user_prompt(request)),
        ])
        .with_json_response();

        let raw = provider.complete(chat).await?;

        let payload: CompletionPayload = serde_json::from_str(&raw)
            .map_err(|e| LlmError::EmptyResponse(format!("unparseable completion: {e}")))?;

        if payload.main_content.trim().is_empty() {
            return Err(LlmError::EmptyResponse(
                "completion contained no main content".to_string(),
            ));
        }

        Ok(GeneratedContent {
            main_content: payload.main_content,
            // The prompt asks for bare tags; enforce the invariant anyway
            hashtags: payload
                .hashtags
                .into_iter()
                .map(|tag| tag.trim_start_matches('#').to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
            suggested_image_prompt: payload.suggested_image_prompt,
            warning: None,
        })
    }
}

/// Per-platform style rules for the system message
fn platform_instructions(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => {
            "Create an engaging Instagram caption with proper spacing, emojis, and a \
             conversational tone. Keep it under 2,200 characters."
        }
        Platform::Twitter => {
            "Create a concise Twitter post under 280 characters with impactful language."
        }
        Platform::Facebook => {
            "Create a Facebook post with a headline and details. Include questions to \
             encourage engagement."
        }
        Platform::Linkedin => {
            "Create a professional LinkedIn post with industry insights and a call to \
             action. Use paragraph breaks for readability."
        }
    }
}

fn system_prompt(platform: Platform) -> String {
    format!(
        "You are an expert social media content creator specializing in creating \
         high-quality, engaging posts for {platform}. {instructions} Write content that \
         resonates with the target audience and drives engagement.",
        platform = platform.as_str(),
        instructions = platform_instructions(platform),
    )
}

fn user_prompt(request: &ContentRequest) -> String {
    let mut prompt = format!(
        "Create a {tone} {platform} post about \"{topic}\"",
        tone = request.tone.as_str(),
        platform = request.platform.as_str(),
        topic = request.topic,
    );
    if let Some(audience) = &request.target_audience {
        prompt.push_str(&format!(" for {audience}"));
    }
    prompt.push('.');

    if let Some(context) = &request.additional_context {
        prompt.push_str(&format!("\nAdditional context: {context}"));
    }
    if request.include_hashtags {
        prompt.push_str("\nInclude relevant hashtags separated at the end.");
    }

    prompt.push_str(
        "\n\nReturn the response in JSON format with these fields:\n\
         - mainContent: The main post content\n\
         - hashtags: An array of relevant hashtags (without the # symbol)\n\
         - suggestedImagePrompt: A prompt that could be used to generate an accompanying image",
    );

    prompt
}
