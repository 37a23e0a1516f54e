//! Generation endpoints with no external provider configured: content
//! degrades to templates, image generation is unavailable.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use postcraft::content::fallback;
use postcraft::content::{Platform, Tone};

#[tokio::test]
async fn content_generation_without_key_uses_templates() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({
            "topic": "summer sale",
            "platform": "twitter",
            "tone": "humorous",
        })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["warning"].as_str().unwrap().is_empty());
    assert_eq!(
        body["mainContent"].as_str().unwrap(),
        fallback::template(Platform::Twitter, Tone::Humorous, "summer sale")
    );
    assert_eq!(body["hashtags"], json!(["trending", "summersale"]));
    assert!(body["suggestedImagePrompt"]
        .as_str()
        .unwrap()
        .contains("summer sale"));
}

#[tokio::test]
async fn omitted_tone_defaults_to_professional() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({ "topic": "AI", "platform": "linkedin" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["mainContent"].as_str().unwrap(),
        fallback::template(Platform::Linkedin, Tone::Professional, "AI")
    );
}

#[tokio::test]
async fn short_topic_is_rejected_with_field_violation() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({ "topic": "ab", "platform": "instagram" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
    let details = body["details"].as_array().unwrap();
    assert!(details
        .iter()
        .any(|v| v["field"] == "topic" && v["message"].as_str().unwrap().contains("3")));
}

#[tokio::test]
async fn unknown_platform_is_rejected() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/generate",
        Some(json!({ "topic": "summer sale", "platform": "myspace" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
}

#[tokio::test]
async fn image_generation_without_key_is_configuration_error() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/image",
        Some(json!({ "prompt": "a red bicycle" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service configuration error");
    assert!(body["message"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn image_prompt_length_is_validated_before_any_call() {
    let app = common::test_app().await;

    let (status, body) = common::request(
        &app,
        "POST",
        "/api/content/image",
        Some(json!({ "prompt": "ab" })),
        None,
    )
    .await;

    // Validation fires before the missing-provider check
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
}
