//! Locates a schema.org `Recipe` entity in a page's embedded structured data.
//!
//! Two syntaxes are scanned in order: JSON-LD script blocks first, then
//! microdata attributes. The first match wins. Each syntax's parser is
//! isolated so a failure in one cannot affect the other, and parse errors
//! are swallowed: malformed embedded metadata is routine on real pages and
//! means "no structured data", not a failed request.

mod json_ld;
mod microdata;

use scraper::Html;
use serde_json::{Map, Value};

/// An untyped key/value mapping believed to represent a `Recipe` entity.
/// Transient: discarded after conversion, successful or not.
pub type Candidate = Map<String, Value>;

/// Scan the document for a Recipe-typed entity. `None` means no structured
/// data was found, which is an expected outcome, not an error.
pub fn locate(document: &Html) -> Option<Candidate> {
    json_ld::find_recipe(document).or_else(|| microdata::find_recipe(document))
}

/// True if the value carries `@type: "Recipe"`, either as a single string
/// or as a member of a type list.
pub(crate) fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "Recipe",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("Recipe")),
        _ => false,
    }
}
