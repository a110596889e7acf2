use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::RecipeDefaults;

const DEFAULT_INGREDIENT_NAME: &str = "Unnamed ingredient";
const DEFAULT_UNKNOWN_INGREDIENT: &str = "Unknown Ingredient";

/// Which pipeline path produced a recipe record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipeSource {
    /// Imported from schema.org structured data embedded in a page
    #[serde(rename = "url_import_schema.org")]
    SchemaOrgImport,
    /// Scraped from page text via the LLM fallback
    #[serde(rename = "url_scrape_gemini_fallback")]
    UrlScrapeFallback,
    /// Generated directly from a user's text prompt
    #[serde(rename = "text_prompt_gemini")]
    TextPrompt,
    /// Extracted from an uploaded image (produced by external collaborators)
    #[serde(rename = "image_upload_gemini_vision")]
    ImageUpload,
}

/// Servings as given by the source, either a count or free text ("4-6 people")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Servings {
    Number(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub item_name: String,
}

/// Normalized recipe record, the sole success type of the resolution pipeline.
///
/// Field names match the persistence contract verbatim, so this serializes
/// directly into the document handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "recipeId")]
    pub recipe_id: String,
    pub title: String,
    pub servings: Servings,
    pub category: String,
    pub difficulty: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    #[serde(rename = "prepTime")]
    pub prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    pub cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    pub total_time: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    pub calories: Option<String>,
    pub source: RecipeSource,
    #[serde(
        rename = "originalImportUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_import_url: Option<String>,
    #[serde(
        rename = "originalImageGcsUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_image_gcs_uri: Option<String>,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "isSecretRecipe")]
    pub is_secret_recipe: bool,
    #[serde(rename = "tipsAndVariations")]
    pub tips_and_variations: Option<String>,
    #[serde(
        rename = "userModificationInstructions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_modification_instructions: Option<String>,
}

impl Recipe {
    /// Generate a fresh opaque recipe id
    pub fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Coerce a parsed LLM output value into a recipe record.
    ///
    /// The model's JSON is close to the record shape but not trustworthy:
    /// ingredients arrive as mappings or bare strings, numbers arrive as
    /// strings, fields go missing. Everything degrades to a default instead
    /// of failing; the caller tags `source` and provenance afterwards.
    pub fn from_llm_value(value: &Value, source: RecipeSource, defaults: &RecipeDefaults) -> Recipe {
        let empty = serde_json::Map::new();
        let map = match value {
            Value::Object(map) => map,
            // Some models wrap the single recipe in a one-element array
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.as_object())
                .unwrap_or(&empty),
            _ => &empty,
        };

        let recipe_id = map
            .get("recipeId")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .unwrap_or_else(Recipe::generate_id);

        let title = non_empty_string(map.get("title"))
            .unwrap_or_else(|| defaults.title.clone());

        let servings = map
            .get("servings")
            .and_then(value_to_servings)
            .unwrap_or(Servings::Number(defaults.servings));

        let ingredients = map
            .get("ingredients")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(coerce_to_ingredient).collect())
            .unwrap_or_default();

        let instructions = map
            .get("instructions")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(instruction_text).collect())
            .unwrap_or_default();

        Recipe {
            recipe_id,
            title,
            servings,
            category: non_empty_string(map.get("category"))
                .unwrap_or_else(|| defaults.category.clone()),
            difficulty: non_empty_string(map.get("difficulty"))
                .unwrap_or_else(|| defaults.difficulty.clone()),
            ingredients,
            instructions,
            prep_time: non_empty_string(map.get("prepTime")),
            cook_time: non_empty_string(map.get("cookTime")),
            total_time: non_empty_string(map.get("totalTime")),
            image_url: non_empty_string(map.get("imageURL")),
            calories: non_empty_string(map.get("calories")),
            source,
            original_import_url: None,
            original_image_gcs_uri: None,
            is_public: false,
            is_secret_recipe: false,
            tips_and_variations: non_empty_string(map.get("tipsAndVariations")),
            user_modification_instructions: non_empty_string(
                map.get("userModificationInstructions"),
            ),
        }
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn value_to_servings(value: &Value) -> Option<Servings> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Servings::Number),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Servings::Text(trimmed.to_string()))
            }
        }
        _ => None,
    }
}

/// Normalize a single ingredient entry into the record shape.
///
/// Accepts a mapping (`quantity`/`unit`/`item_name`, with `name` as an alias)
/// or a bare string; anything else becomes the unknown-ingredient placeholder.
pub fn coerce_to_ingredient(item: &Value) -> Ingredient {
    match item {
        Value::Object(map) => {
            let quantity = match map.get("quantity") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
                _ => None,
            };

            let unit = map
                .get("unit")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from);

            let item_name = map
                .get("item_name")
                .or_else(|| map.get("name"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_INGREDIENT_NAME)
                .to_string();

            Ingredient {
                quantity,
                unit,
                item_name,
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            Ingredient {
                quantity: None,
                unit: None,
                item_name: if trimmed.is_empty() {
                    DEFAULT_INGREDIENT_NAME.to_string()
                } else {
                    trimmed.to_string()
                },
            }
        }
        _ => Ingredient {
            quantity: None,
            unit: None,
            item_name: DEFAULT_UNKNOWN_INGREDIENT.to_string(),
        },
    }
}

fn instruction_text(step: &Value) -> Option<String> {
    let text = match step {
        Value::String(s) => s.trim(),
        Value::Object(map) => map.get("text").and_then(Value::as_str)?.trim(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
