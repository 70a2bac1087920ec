pub mod client;
pub mod config;
pub mod prompt;

pub use client::{GeminiClient, GenerationError};
pub use config::GeminiConfig;
pub use prompt::build_prompt;
