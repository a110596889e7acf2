use crate::config::ProviderConfig;
use crate::error::ImportError;
use crate::providers::{build_user_content, LlmProvider, RECIPE_EXTRACTION_PROMPT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, ImportError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                ImportError::AiServiceFailed(
                    "GOOGLE_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".to_string());

        Ok(GoogleProvider {
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
impl LlmProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn extract_recipe(
        &self,
        page_text: &str,
        user_instructions: Option<&str>,
        user_preferences: Option<&Value>,
        source_url: &str,
    ) -> Result<String, ImportError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let user_content =
            build_user_content(page_text, user_instructions, user_preferences, source_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": format!("{}\n\n{}", RECIPE_EXTRACTION_PROMPT, user_content)
                    }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens,
                    "responseMimeType": "application/json"
                }
            }))
            .send()
            .await
            .map_err(|e| ImportError::AiServiceFailed(e.to_string()))?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| ImportError::AiServiceFailed(e.to_string()))?;
        debug!("{:?}", response_body);

        let raw_text = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ImportError::AiServiceFailed(
                    "Failed to extract content from Gemini response".to_string(),
                )
            })?
            .to_string();

        Ok(raw_text)
    }
}
