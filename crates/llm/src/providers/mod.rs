pub mod gemini;

use std::sync::Arc;

use pdfchat_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the Gemini provider from config. Fails when no API key is set.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let api_key = llm_config
        .api_key
        .as_ref()
        .ok_or_else(|| LlmError::NotConfigured("API_KEY not set".into()))?;
    Ok(Arc::new(gemini::GeminiProvider::new(
        api_key.clone(),
        llm_config.model.clone(),
        llm_config.base_url.clone(),
    )))
}
