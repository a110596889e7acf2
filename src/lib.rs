pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod json_repair;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod schema_convert;
pub mod text_extract;

pub use config::AppConfig;
pub use error::ImportError;
pub use model::{Ingredient, Recipe, RecipeSource, Servings};
pub use providers::{LlmProvider, ProviderFactory};

use serde_json::Value;

/// Resolve a web page into a recipe record using the configured default
/// provider for the LLM fallback.
pub async fn import_recipe(
    url: &str,
    user_instructions: Option<&str>,
    user_preferences: Option<&Value>,
) -> Result<Recipe, ImportError> {
    let config = AppConfig::load()?;
    let provider = ProviderFactory::get_default_provider(&config)?;
    pipelines::url::process(
        url,
        user_instructions,
        user_preferences,
        provider.as_ref(),
        &config,
    )
    .await
}

/// Generate a recipe record directly from a free-text prompt.
pub async fn generate_recipe(prompt_text: &str) -> Result<Recipe, ImportError> {
    let config = AppConfig::load()?;
    let provider = ProviderFactory::get_default_provider(&config)?;
    pipelines::text::process(prompt_text, provider.as_ref(), &config).await
}
