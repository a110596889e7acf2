//! Maps a schema.org `Recipe` candidate into the internal record.
//!
//! Pure conversion: no I/O, and it cannot fail. Anything missing or
//! unrecognized falls back to a configured default, because a partially
//! useful record beats aborting a page that did carry structured data.

use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::config::RecipeDefaults;
use crate::model::{Ingredient, Recipe, RecipeSource, Servings};

/// Parse an ISO-8601-style duration ("PT1H30M") into a display string
/// ("1 hr 30 min"). Missing or unparseable input yields `None`, never an error.
pub fn parse_schema_duration(duration: Option<&str>) -> Option<String> {
    let duration = duration?.trim();
    if !duration.starts_with("PT") {
        return None;
    }

    let hours_re = Regex::new(r"(\d+)H").unwrap();
    let mins_re = Regex::new(r"(\d+)M").unwrap();

    let mut parts = Vec::new();
    if let Some(caps) = hours_re.captures(duration) {
        parts.push(format!("{} hr", &caps[1]));
    }
    if let Some(caps) = mins_re.captures(duration) {
        parts.push(format!("{} min", &caps[1]));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Convert a structured-data candidate into a recipe record.
pub fn convert(data: &Map<String, Value>, source_url: &str, defaults: &RecipeDefaults) -> Recipe {
    let title = string_field(data.get("name"))
        .unwrap_or_else(|| defaults.title.clone());

    let servings = data
        .get("recipeYield")
        .and_then(yield_to_servings)
        .unwrap_or(Servings::Number(defaults.servings));

    let category = joined_string_field(data.get("recipeCategory"))
        .unwrap_or_else(|| defaults.category.clone());

    // schema.org has no difficulty field; accept whatever the page invented
    let difficulty = string_field(data.get("difficulty"))
        .unwrap_or_else(|| defaults.difficulty.clone());

    let prep_time = parse_schema_duration(data.get("prepTime").and_then(Value::as_str));
    let cook_time = parse_schema_duration(data.get("cookTime").and_then(Value::as_str));
    let total_time = parse_schema_duration(data.get("totalTime").and_then(Value::as_str));

    let ingredients = convert_ingredients(data.get("recipeIngredient"));
    let instructions = convert_instructions(data.get("recipeInstructions"));

    let image_url = match data.get("image") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(Value::as_str)
            .map(|s| s.trim().to_string()),
        _ => None,
    };

    let calories = data
        .get("nutrition")
        .and_then(Value::as_object)
        .and_then(|n| n.get("calories"))
        .and_then(Value::as_str)
        .map(|c| c.trim().to_string());

    debug!("Converted schema.org candidate from {source_url}: {title}");

    Recipe {
        recipe_id: Recipe::generate_id(),
        title,
        servings,
        category,
        difficulty,
        ingredients,
        instructions,
        prep_time,
        cook_time,
        total_time,
        image_url,
        calories,
        source: RecipeSource::SchemaOrgImport,
        original_import_url: Some(source_url.to_string()),
        original_image_gcs_uri: None,
        is_public: false,
        is_secret_recipe: false,
        tips_and_variations: None,
        user_modification_instructions: None,
    }
}

fn convert_ingredients(value: Option<&Value>) -> Vec<Ingredient> {
    let raw = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>(),
        // A lone string is one ingredient, not a character sequence
        Some(Value::String(s)) => vec![s.as_str()],
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(decode)
        .filter(|ing| !ing.is_empty())
        // Quantity/unit parsing is deliberately not attempted here
        .map(|item_name| Ingredient {
            quantity: None,
            unit: None,
            item_name,
        })
        .collect()
}

fn convert_instructions(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(steps)) => steps
            .iter()
            .filter_map(|step| match step {
                Value::String(s) => Some(s.as_str()),
                Value::Object(map) => map.get("text").and_then(Value::as_str),
                _ => None,
            })
            .map(decode)
            .filter(|s| !s.is_empty())
            .collect(),
        // Coarse heuristic: a run-on paragraph is split on periods. This
        // mangles abbreviations ("350°F." splits) but any loss beats a
        // single unreadable step.
        Some(Value::String(s)) => decode(s)
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn yield_to_servings(value: &Value) -> Option<Servings> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Servings::Number),
        Value::String(s) if !s.trim().is_empty() => Some(Servings::Text(s.trim().to_string())),
        Value::Array(items) => items.first().and_then(yield_to_servings),
        _ => None,
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(decode)
        .filter(|s| !s.is_empty())
}

fn joined_string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(decode(s)),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .map(decode)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
        _ => None,
    }
}

fn decode(text: &str) -> String {
    // Some sites double-encode entities, so decode twice
    html_escape::decode_html_entities(&html_escape::decode_html_entities(text))
        .trim()
        .to_string()
}
