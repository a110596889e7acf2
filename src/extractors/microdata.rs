use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use super::Candidate;

/// Scan `itemscope` elements for an `itemtype` ending in `/Recipe` and build
/// that entity's property map from its `itemprop` descendants.
///
/// Scoping to a Recipe container matters: a global itemprop sweep picks up
/// site titles, author bios, and ads.
pub(crate) fn find_recipe(document: &Html) -> Option<Candidate> {
    let scope_selector = Selector::parse("[itemscope]").unwrap();

    for element in document.select(&scope_selector) {
        let Some(itemtype) = element.value().attr("itemtype") else {
            continue;
        };
        if itemtype.trim_end_matches('/').ends_with("/Recipe") {
            debug!("Found schema.org/Recipe microdata container");
            return Some(collect_properties(element));
        }
    }

    None
}

fn collect_properties(container: ElementRef) -> Candidate {
    let prop_selector = Selector::parse("[itemprop]").unwrap();
    let mut properties = Candidate::new();

    for element in container.select(&prop_selector) {
        // Properties of nested itemscope entities (author, nutrition) belong
        // to those entities, not to the recipe
        if !belongs_to_scope(element, container) {
            continue;
        }
        let Some(prop) = element.value().attr("itemprop") else {
            continue;
        };
        let Some(value) = property_value(element) else {
            continue;
        };

        // Repeated properties (ingredients, steps) accumulate into an array
        match properties.remove(prop) {
            None => {
                properties.insert(prop.to_string(), Value::String(value));
            }
            Some(Value::String(existing)) => {
                properties.insert(
                    prop.to_string(),
                    Value::Array(vec![Value::String(existing), Value::String(value)]),
                );
            }
            Some(Value::Array(mut items)) => {
                items.push(Value::String(value));
                properties.insert(prop.to_string(), Value::Array(items));
            }
            Some(other) => {
                properties.insert(prop.to_string(), other);
            }
        }
    }

    properties
}

/// True if the nearest `itemscope` ancestor of `element` is `scope` itself.
fn belongs_to_scope(element: ElementRef, scope: ElementRef) -> bool {
    for ancestor in element.ancestors() {
        if ancestor.id() == scope.id() {
            return true;
        }
        let is_scope = ElementRef::wrap(ancestor)
            .map(|el| el.value().attr("itemscope").is_some())
            .unwrap_or(false);
        if is_scope {
            return false;
        }
    }
    false
}

/// Microdata property values live in different places depending on the tag:
/// `content` on meta, `datetime` on time, `src`/`href` on media and links,
/// element text otherwise.
fn property_value(element: ElementRef) -> Option<String> {
    for attr in ["content", "datetime", "src", "href"] {
        if let Some(value) = element.value().attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    let text = element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
