use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;

use super::{is_recipe_type, Candidate};

/// Scan `<script type="application/ld+json">` blocks, in document order, for
/// a Recipe-typed entity. Within each block, directly typed entities win over
/// entities nested in an `@graph` container.
pub(crate) fn find_recipe(document: &Html) -> Option<Candidate> {
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    for (index, script) in document.select(&selector).enumerate() {
        let raw_json = script.inner_html();
        let parsed: Value = match serde_json::from_str(&raw_json) {
            Ok(value) => value,
            Err(e) => {
                debug!("Skipping unparseable JSON-LD block {index}: {e}");
                continue;
            }
        };

        if let Some(candidate) = recipe_in_block(&parsed) {
            debug!("Found schema.org/Recipe in JSON-LD block {index}");
            return Some(candidate.clone());
        }
    }

    None
}

fn recipe_in_block(value: &Value) -> Option<&Candidate> {
    let entities: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    // Directly typed entities first
    for entity in &entities {
        if is_recipe_type(entity) {
            return entity.as_object();
        }
    }

    // Then entities nested in @graph containers, in container order
    for entity in &entities {
        if let Some(graph) = entity.get("@graph").and_then(Value::as_array) {
            for item in graph {
                if is_recipe_type(item) {
                    return item.as_object();
                }
            }
        }
    }

    None
}
