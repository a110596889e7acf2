//! Reduces raw page markup to a bounded plain-text excerpt for the LLM.
//!
//! The goal is signal over completeness: navigation, ads, and comment
//! sections are stripped outright, then the first matching content selector
//! wins. Whatever survives is whitespace-collapsed and truncated.

use log::{debug, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Tags that never contain recipe content
const DENY_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "form", "button", "iframe",
    "noscript", "link", "meta", "head", "figure", "figcaption",
];

/// Substrings of class/id attributes that mark boilerplate containers
const DENY_PATTERNS: &[&str] = &[
    "comment",
    "sidebar",
    "related-posts",
    "related-articles",
    "social-share",
    "share-buttons",
    "advertisement",
    "ad-",
    "site-header",
    "site-footer",
    "main-navigation",
];

/// Selectors likely to contain the main recipe body, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    r#"[itemtype$="/Recipe"]"#,
    r#"article[class*="recipe"]"#,
    r#"div[class*="recipe-content"]"#,
    r#"div[id*="recipe"]"#,
    "article.post",
    "div.entry-content",
    "div.post-content",
    r#"main[role="main"]"#,
    "main",
    "div.main-content",
    "div#main",
    "div.content",
];

/// Extract a plain-text excerpt from page markup, capped at `max_chars`.
///
/// Truncation is silent: a partial excerpt is still useful model context.
pub fn extract_relevant_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    let mut content_texts: Vec<String> = Vec::new();
    for selector_str in CONTENT_SELECTORS {
        let selector = Selector::parse(selector_str).unwrap();
        let elements: Vec<ElementRef> = document.select(&selector).collect();
        if !elements.is_empty() {
            debug!("Found content with selector: {selector_str}");
            for element in elements {
                let text = element_text(element);
                if !text.is_empty() {
                    content_texts.push(text);
                }
            }
            if !content_texts.is_empty() {
                break;
            }
        }
    }

    if content_texts.is_empty() {
        debug!("No content selector matched, falling back to full body text");
        let body_selector = Selector::parse("body").unwrap();
        if let Some(body) = document.select(&body_selector).next() {
            let text = element_text(body);
            if !text.is_empty() {
                content_texts.push(text);
            }
        }
    }

    let full_text = content_texts.join("\n\n");
    let cleaned = collapse_whitespace(&full_text);

    if cleaned.chars().count() > max_chars {
        warn!("Extracted text truncated to {max_chars} characters");
        cleaned.chars().take(max_chars).collect()
    } else {
        cleaned
    }
}

/// Collect the text of an element, skipping denylisted subtrees.
fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push('\n');
            }
        } else if let Some(child_ref) = ElementRef::wrap(child) {
            if !is_denied(&child_ref) {
                collect_text(child_ref, out);
            }
        }
    }
}

fn is_denied(element: &ElementRef) -> bool {
    let name = element.value().name();
    if DENY_TAGS.contains(&name) {
        return true;
    }

    let attrs = element.value();
    let class = attrs.attr("class").unwrap_or("").to_lowercase();
    let id = attrs.attr("id").unwrap_or("").to_lowercase();
    DENY_PATTERNS
        .iter()
        .any(|pattern| class.contains(pattern) || id.contains(pattern))
}

fn collapse_whitespace(text: &str) -> String {
    let horizontal = Regex::new(r"[ \t]{2,}").unwrap();
    let blank_lines = Regex::new(r"(?:[ \t]*\n){3,}").unwrap();

    let collapsed = horizontal.replace_all(text, " ");
    let collapsed = blank_lines.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}
