//! # postcraft
//!
//! Social-media content management service: JWT-authenticated users
//! generate post copy through an external language model (degrading to
//! deterministic templates when the service is unconfigured or failing),
//! optionally generate an accompanying image, and manage posts that may
//! carry a desired future publication time.

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod http_server;
pub mod llm;
pub mod logging;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use http_server::AppState;
