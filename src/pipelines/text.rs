//! Direct text-prompt generation: no page involved, the user's free-text
//! request goes straight to the LLM and the output is repair-parsed into a
//! record tagged with the text-prompt source.

use log::info;

use crate::config::AppConfig;
use crate::error::ImportError;
use crate::json_repair;
use crate::model::{Recipe, RecipeSource};
use crate::providers::LlmProvider;

pub async fn process(
    prompt_text: &str,
    provider: &dyn LlmProvider,
    config: &AppConfig,
) -> Result<Recipe, ImportError> {
    let raw_output = provider
        .extract_recipe(prompt_text, None, None, "direct-input")
        .await?;

    let value = json_repair::extract_json_from_text(&raw_output)?;
    let recipe = Recipe::from_llm_value(&value, RecipeSource::TextPrompt, &config.defaults);

    info!("Generated recipe from text prompt: {}", recipe.title);
    Ok(recipe)
}
