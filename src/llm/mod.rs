//! External generation collaborators.
//!
//! The rest of the service talks to language-model and image services
//! through the capability traits in [`providers`]; the concrete OpenAI
//! client lives behind them and can be swapped out or absent entirely.

pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use config::LlmConfig;
pub use error::{LlmError, LlmResult};
pub use providers::{openai::OpenAiProvider, ChatCompletion, ImageGeneration};
pub use types::{ChatRequest, Message, Role};
