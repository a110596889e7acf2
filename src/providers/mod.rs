mod factory;
mod google;
mod open_ai;

pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ImportError;

/// The system prompt used for extracting a recipe record from page text.
///
/// Loaded from `prompt.txt` at compile time using the `include_str!` macro,
/// making it easy to edit without dealing with Rust string syntax.
pub const RECIPE_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Extract a recipe from page text, returning the model's raw text output.
    /// The caller owns JSON parsing and repair.
    async fn extract_recipe(
        &self,
        page_text: &str,
        user_instructions: Option<&str>,
        user_preferences: Option<&Value>,
        source_url: &str,
    ) -> Result<String, ImportError>;
}

/// Assemble the user-turn content shared by all providers.
pub(crate) fn build_user_content(
    page_text: &str,
    user_instructions: Option<&str>,
    user_preferences: Option<&Value>,
    source_url: &str,
) -> String {
    let mut content = format!("Source URL: {source_url}\n");

    if let Some(instructions) = user_instructions {
        let trimmed = instructions.trim();
        if !trimmed.is_empty() {
            content.push_str(&format!("User instructions: {trimmed}\n"));
        }
    }

    if let Some(preferences) = user_preferences {
        content.push_str(&format!("User preferences: {preferences}\n"));
    }

    content.push_str("\nPage text:\n");
    content.push_str(page_text);
    content
}
