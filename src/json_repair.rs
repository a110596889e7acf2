//! Best-effort recovery of JSON from LLM output.
//!
//! Model output is near-JSON at best: fenced in markdown, sprinkled with
//! comments, trailing commas, or Python literals. The repair sequence is an
//! ordered list of text transforms applied only after a direct parse fails,
//! so well-formed output never pays for the repairs.

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::error::ImportError;

/// Maximum number of characters of the offending text carried in an error
const ERROR_EXCERPT_CHARS: usize = 500;

/// Strip markdown fences and parse, applying the repair sequence on failure.
pub fn scrub_and_parse(raw: &str) -> Result<Value, ImportError> {
    let fence = Regex::new(r"(?im)^```(?:json)?\s*|\s*```$").unwrap();
    let stripped = fence.replace_all(raw, "").trim().to_string();

    match serde_json::from_str::<Value>(&stripped) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("Initial JSON parse failed: {e}");
            let repaired = apply_repairs(&stripped);
            serde_json::from_str::<Value>(&repaired).map_err(|final_e| {
                debug!("JSON parse still failing after repairs: {final_e}");
                ImportError::MalformedOutput {
                    error: final_e.to_string(),
                    excerpt: excerpt(&repaired),
                }
            })
        }
    }
}

/// Locate the first top-level `{...}` or `[...]` span in a text blob and
/// parse it with the repair contract. Models often wrap their JSON in prose.
pub fn extract_json_from_text(text: &str) -> Result<Value, ImportError> {
    // Greedy from the first opening brace/bracket to the last closing one
    let span = Regex::new(r"(?s)\{.*\}|\[.*\]").unwrap();
    let candidate = span
        .find(text)
        .map(|m| m.as_str())
        .ok_or(ImportError::NoJsonFound)?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Ok(value),
        Err(_) => scrub_and_parse(candidate),
    }
}

/// The ordered repair transforms. Each is a pure string rewrite; new repairs
/// slot in here without touching control flow.
fn apply_repairs(text: &str) -> String {
    let line_comments = Regex::new(r"//.*").unwrap();
    let block_comments = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    let trailing_commas = Regex::new(r",\s*([\]}])").unwrap();

    let fixed = line_comments.replace_all(text, "");
    let fixed = block_comments.replace_all(&fixed, "");
    let fixed = trailing_commas.replace_all(&fixed, "$1");

    // Literal token sweep, knowingly blind to string contents (original behavior)
    fixed
        .replace("None", "null")
        .replace("True", "true")
        .replace("False", "false")
        .replace("undefined", "null")
        .replace('…', "...")
}

fn excerpt(text: &str) -> String {
    text.chars().take(ERROR_EXCERPT_CHARS).collect()
}
