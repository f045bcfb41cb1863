pub mod gemini;

use docqa_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the answer-generation provider from config.
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    let api_key = config
        .api_key
        .as_ref()
        .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY not set".into()))?;
    Ok(Box::new(gemini::GeminiProvider::new(
        api_key.clone(),
        config.model.clone(),
    )))
}
