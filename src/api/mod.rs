//! HTTP API handlers.

pub mod auth;
pub mod content;
pub mod posts;
pub mod validation;

pub use validation::ValidatedJson;
