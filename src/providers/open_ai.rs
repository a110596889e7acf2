use crate::config::ProviderConfig;
use crate::error::ImportError;
use crate::providers::{build_user_content, LlmProvider, RECIPE_EXTRACTION_PROMPT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ImportError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                ImportError::AiServiceFailed(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn extract_recipe(
        &self,
        page_text: &str,
        user_instructions: Option<&str>,
        user_preferences: Option<&Value>,
        source_url: &str,
    ) -> Result<String, ImportError> {
        let user_content =
            build_user_content(page_text, user_instructions, user_preferences, source_url);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": RECIPE_EXTRACTION_PROMPT},
                    {"role": "user", "content": user_content}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens,
                "response_format": {"type": "json_object"}
            }))
            .send()
            .await
            .map_err(|e| ImportError::AiServiceFailed(e.to_string()))?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| ImportError::AiServiceFailed(e.to_string()))?;
        debug!("{:?}", response_body);

        let raw_text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ImportError::AiServiceFailed(
                    "Failed to extract content from response".to_string(),
                )
            })?
            .to_string();

        Ok(raw_text)
    }
}
