//! The URL resolution pipeline: fetch, try structured data, fall back to
//! text scraping through the LLM.
//!
//! The fallback chain is linear and auditable stage by stage:
//!
//! 1. validate the URL scheme
//! 2. fetch the page (terminal on failure; nothing to scrape without content)
//! 3. locate structured data; convert it if usable
//! 4. otherwise extract a plain-text excerpt
//! 5. hand the excerpt to the LLM and repair-parse its output
//!
//! Failure is fatal per request. Retries, if any, belong to the fetch and
//! LLM collaborators, not here.

use log::{info, warn};
use scraper::Html;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::ImportError;
use crate::extractors;
use crate::fetch::PageFetcher;
use crate::json_repair;
use crate::model::{Recipe, RecipeSource};
use crate::providers::LlmProvider;
use crate::schema_convert;
use crate::text_extract;

/// Resolve a URL into a recipe record.
pub async fn process(
    url: &str,
    user_instructions: Option<&str>,
    user_preferences: Option<&Value>,
    provider: &dyn LlmProvider,
    config: &AppConfig,
) -> Result<Recipe, ImportError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ImportError::InvalidInput(url.to_string()));
    }

    let fetcher = PageFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
    let (html_content, _final_url) = fetcher.fetch(url).await?;

    // Structured-data phase is fully synchronous; the parsed document must
    // not be held across an await (scraper's Html is not Send)
    let candidate = {
        let document = Html::parse_document(&html_content);
        extractors::locate(&document)
    };

    if let Some(candidate) = candidate {
        let recipe = schema_convert::convert(&candidate, url, &config.defaults);
        if recipe.ingredients.is_empty() && recipe.instructions.is_empty() {
            // Type matched but the shape carried nothing usable; degrade to
            // the scrape path rather than returning an empty shell
            warn!("Structured data at {url} had no usable content, falling back to text scrape");
        } else {
            info!("Resolved {url} via structured data: {}", recipe.title);
            return Ok(attach_instructions(recipe, user_instructions));
        }
    } else {
        info!("No schema.org/Recipe structured data at {url}, attempting text scrape");
    }

    let page_text = text_extract::extract_relevant_text(&html_content, config.max_excerpt_chars);
    if page_text.trim().is_empty() {
        return Err(ImportError::NoExtractableContent(url.to_string()));
    }

    let raw_output = provider
        .extract_recipe(&page_text, user_instructions, user_preferences, url)
        .await?;

    let value = json_repair::extract_json_from_text(&raw_output)?;

    let mut recipe = Recipe::from_llm_value(&value, RecipeSource::UrlScrapeFallback, &config.defaults);
    recipe.original_import_url = Some(url.to_string());
    let recipe = attach_instructions(recipe, user_instructions);

    info!("Resolved {url} via LLM fallback: {}", recipe.title);
    Ok(recipe)
}

/// Instructions apply regardless of which path produced the record, but the
/// model's own value wins if it already set one.
fn attach_instructions(mut recipe: Recipe, user_instructions: Option<&str>) -> Recipe {
    if recipe.user_modification_instructions.is_none() {
        if let Some(instructions) = user_instructions.map(str::trim).filter(|s| !s.is_empty()) {
            recipe.user_modification_instructions = Some(instructions.to_string());
        }
    }
    recipe
}
