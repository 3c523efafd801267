pub mod analyst;
pub mod client;
pub mod prompts;
pub mod types;

pub use analyst::*;
pub use client::*;
pub use types::*;

use crate::error::{AnalysisError, Result};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Reads the API key from the environment. A missing or unreadable value is
/// a configuration error that disables the AI features, not the numeric
/// pipeline.
pub fn api_key_from_env() -> Result<String> {
    std::env::var(API_KEY_VAR).map_err(|_| AnalysisError::ApiKeyMissing)
}
