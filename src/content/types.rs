//! Request and response shapes for content generation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Target social platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
    Facebook,
    Linkedin,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Twitter,
        Platform::Facebook,
        Platform::Linkedin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Linkedin => "linkedin",
        }
    }
}

/// Voice of the generated copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Humorous,
    Inspirational,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Humorous,
        Tone::Inspirational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Humorous => "humorous",
            Tone::Inspirational => "inspirational",
        }
    }
}

/// Content generation request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    #[validate(length(min = 3, max = 200, message = "topic must be between 3 and 200 characters"))]
    pub topic: String,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default = "default_include_hashtags")]
    pub include_hashtags: bool,
    pub platform: Platform,
    #[serde(default)]
    pub additional_context: Option<String>,
}

fn default_include_hashtags() -> bool {
    true
}

/// Generated post copy.
///
/// `warning` is present exactly when the fallback template path produced
/// the result. Hashtag entries never carry a `#` prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub main_content: String,
    pub hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_image_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Image generation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImageRequest {
    #[validate(length(min = 3, max = 1000, message = "prompt must be between 3 and 1000 characters"))]
    pub prompt: String,
}

/// Generated image, addressed by URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
    /// Echo of the input prompt
    pub prompt: String,
}
