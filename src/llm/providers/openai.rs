//! OpenAI provider implementation.
//!
//! One client instance is constructed at process start when an API key is
//! configured and injected wherever a generation capability is needed.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateImageRequestArgs, Image, ImageModel, ImageQuality, ImageResponseFormat,
        ImageSize, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;

use crate::llm::{
    config::LlmConfig,
    error::{LlmError, LlmResult},
    providers::{ChatCompletion, ImageGeneration},
    types::{Message, Role},
};

pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAiProvider {
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;

        let openai_config = OpenAIConfig::new().with_api_key(config.api_key());
        let client = Client::with_config(openai_config);

        Ok(Self { client, config })
    }

    fn convert_messages(&self, messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .filter_map(|msg| match msg.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .ok()
                    .map(Into::into),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.clone())
                    .build()
                    .ok()
                    .map(Into::into),
                // Assistant history is not sent by this service
                Role::Assistant => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatCompletion for OpenAiProvider {
    async fn complete(&self, request: crate::llm::types::ChatRequest) -> LlmResult<String> {
        let messages = self.convert_messages(&request.messages);

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages);

        req_builder.temperature(request.temperature.unwrap_or(self.config.temperature));

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        let chat_request = req_builder
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| LlmError::Api(e.to_string()))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::EmptyResponse("no choices in response".to_string()))?;

        let content = choice.message.content.clone().unwrap_or_default();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse(
                "completion contained no content".to_string(),
            ));
        }

        Ok(content)
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

#[async_trait]
impl ImageGeneration for OpenAiProvider {
    async fn generate_image(&self, prompt: &str) -> LlmResult<String> {
        let image_model = match self.config.image_model.as_str() {
            "dall-e-2" => ImageModel::DallE2,
            "dall-e-3" => ImageModel::DallE3,
            other => ImageModel::Other(other.to_string()),
        };

        // One image, fixed square resolution, standard quality, URL result
        let request = CreateImageRequestArgs::default()
            .model(image_model)
            .prompt(prompt)
            .n(1)
            .size(ImageSize::S1024x1024)
            .quality(ImageQuality::Standard)
            .response_format(ImageResponseFormat::Url)
            .build()
            .map_err(|e| LlmError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .images()
            .create(request)
            .await
            .map_err(|e| LlmError::Api(e.to_string()))?;

        match response.data.first().map(AsRef::as_ref) {
            Some(Image::Url { url, .. }) if !url.is_empty() => Ok(url.clone()),
            _ => Err(LlmError::EmptyResponse(
                "image response contained no URL".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
