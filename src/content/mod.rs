//! Social-media content generation.
//!
//! [`ContentGenerator`] turns a request into post copy, preferring a live
//! language-model call and degrading to the deterministic templates in
//! [`fallback`]. [`ImageGenerator`] has no such safety net: without a
//! configured provider it fails with a configuration error.

pub mod fallback;
pub mod generator;
pub mod image;
pub mod types;

pub use generator::ContentGenerator;
pub use image::ImageGenerator;
pub use types::{
    ContentRequest, GeneratedContent, GeneratedImage, ImageRequest, Platform, Tone,
};
