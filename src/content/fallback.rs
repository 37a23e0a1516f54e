//! Deterministic template-based generation.
//!
//! Used whenever the external service is unconfigured or fails. Template
//! selection is a pure function of `(platform, tone)`; the full 4x4 table
//! is enumerated below so completeness is directly testable.

use crate::content::types::{ContentRequest, GeneratedContent, Platform, Tone};

/// Warning attached to every fallback result
pub const FALLBACK_WARNING: &str = "Using fallback template generation. \
    For better results, configure an OpenAI API key in environment variables.";

/// Produce post copy from the fixed template table.
pub fn generate(request: &ContentRequest) -> GeneratedContent {
    GeneratedContent {
        main_content: template(request.platform, request.tone, &request.topic),
        hashtags: hashtags(request.platform, &request.topic),
        suggested_image_prompt: Some(image_prompt(&request.topic)),
        warning: Some(FALLBACK_WARNING.to_string()),
    }
}

/// Canned copy for a `(platform, tone)` pair with the topic interpolated.
pub fn template(platform: Platform, tone: Tone, topic: &str) -> String {
    use Platform::*;
    use Tone::*;

    match (platform, tone) {
        (Instagram, Professional) => format!(
            "Check out our latest updates on {topic}! We're committed to bringing you the best experience.\n\nStay tuned for more updates."
        ),
        (Instagram, Casual) => format!(
            "Hey there! \u{1F44B} Just wanted to share some cool stuff about {topic}! What do you think?"
        ),
        (Instagram, Humorous) => format!(
            "We promise {topic} isn't as boring as your ex's Instagram stories! \u{1F602} Check it out!"
        ),
        (Instagram, Inspirational) => format!(
            "Every journey begins with a single step. Our journey with {topic} is just beginning. Join us on this amazing path!"
        ),
        (Twitter, Professional) => format!(
            "Exciting developments with {topic}. Stay updated with our latest announcements!"
        ),
        (Twitter, Casual) => format!("Just vibing with {topic} today! What's everyone up to?"),
        (Twitter, Humorous) => format!(
            "{topic} - because we needed one more thing to talk about on Twitter! \u{1F604}"
        ),
        (Twitter, Inspirational) => format!(
            "Dream big. Start small. Act now. {topic} is changing the game!"
        ),
        (Facebook, Professional) => format!(
            "Announcing our latest updates regarding {topic}. Click to learn more about how this affects our community."
        ),
        (Facebook, Casual) => format!(
            "Hey friends! Anyone else excited about {topic}? Share your thoughts below!"
        ),
        (Facebook, Humorous) => format!(
            "If {topic} was a person, they'd definitely be the one bringing snacks to the party. Just saying!"
        ),
        (Facebook, Inspirational) => format!(
            "The future belongs to those who believe in the beauty of their dreams. {topic} is our dream, and we're making it reality."
        ),
        (Linkedin, Professional) => format!(
            "We're pleased to announce our latest developments regarding {topic}. This represents a significant step forward for our organization."
        ),
        (Linkedin, Casual) => format!(
            "Interesting developments with {topic} this week. Would love to hear thoughts from my network on this!"
        ),
        (Linkedin, Humorous) => format!(
            "They say success is 1% inspiration and 99% perspiration. {topic} is that 1% that made all the difference!"
        ),
        (Linkedin, Inspirational) => format!(
            "The difference between ordinary and extraordinary is that little extra. {topic} is our extra. What's yours?"
        ),
    }
}

/// Platform-appropriate tags plus a slug of the topic, no `#` prefixes.
pub fn hashtags(platform: Platform, topic: &str) -> Vec<String> {
    let slug = slug(topic);
    match platform {
        Platform::Instagram => vec![
            "instagood".to_string(),
            "photooftheday".to_string(),
            slug,
            "trending".to_string(),
        ],
        Platform::Twitter => vec!["trending".to_string(), slug],
        Platform::Facebook => vec![slug, "community".to_string()],
        Platform::Linkedin => vec![
            "innovation".to_string(),
            "professional".to_string(),
            slug,
        ],
    }
}

/// Topic with all whitespace removed
pub fn slug(topic: &str) -> String {
    topic.split_whitespace().collect()
}

pub fn image_prompt(topic: &str) -> String {
    format!("A professional image representing {topic} with good lighting and composition")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        for platform in Platform::ALL {
            for tone in Tone::ALL {
                let copy = template(platform, tone, "summer sale");
                assert!(
                    !copy.is_empty(),
                    "empty template for ({}, {})",
                    platform.as_str(),
                    tone.as_str()
                );
                assert!(
                    copy.contains("summer sale"),
                    "topic not interpolated for ({}, {})",
                    platform.as_str(),
                    tone.as_str()
                );
            }
        }
    }

    #[test]
    fn test_selection_is_pure() {
        for platform in Platform::ALL {
            for tone in Tone::ALL {
                let first = template(platform, tone, "product launch");
                let second = template(platform, tone, "product launch");
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_slug_strips_whitespace() {
        assert_eq!(slug("summer sale"), "summersale");
        assert_eq!(slug("  spaced   out  topic "), "spacedouttopic");
        assert_eq!(slug("AI"), "AI");
    }

    #[test]
    fn test_hashtags_have_no_hash_prefix() {
        for platform in Platform::ALL {
            for tag in hashtags(platform, "summer sale") {
                assert!(!tag.contains('#'), "tag {tag:?} contains '#'");
                assert!(!tag.is_empty());
            }
        }
    }

    #[test]
    fn test_twitter_hashtags() {
        assert_eq!(
            hashtags(Platform::Twitter, "summer sale"),
            vec!["trending".to_string(), "summersale".to_string()]
        );
    }

    #[test]
    fn test_image_prompt_shape() {
        assert_eq!(
            image_prompt("summer sale"),
            "A professional image representing summer sale with good lighting and composition"
        );
    }

    #[test]
    fn test_generate_marks_fallback() {
        let request = ContentRequest {
            topic: "summer sale".to_string(),
            tone: Tone::Humorous,
            target_audience: None,
            include_hashtags: true,
            platform: Platform::Twitter,
            additional_context: None,
        };
        let content = generate(&request);
        assert_eq!(content.warning.as_deref(), Some(FALLBACK_WARNING));
        assert_eq!(
            content.main_content,
            template(Platform::Twitter, Tone::Humorous, "summer sale")
        );
        assert_eq!(content.hashtags, vec!["trending", "summersale"]);
        assert!(content.suggested_image_prompt.is_some());
    }
}
