use crate::config::{AppConfig, ProviderConfig};
use crate::error::ImportError;
use crate::providers::{GoogleProvider, LlmProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        if !config.enabled {
            return Err(ImportError::AiServiceFailed(format!(
                "Provider '{provider_name}' is not enabled in configuration"
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            _ => Err(ImportError::AiServiceFailed(format!(
                "Unknown provider: {provider_name}"
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            ImportError::AiServiceFailed(format!(
                "Default provider '{provider_name}' not found in configuration"
            ))
        })?;

        Self::create(provider_name, provider_config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
