use thiserror::Error;

/// Errors that can occur while resolving a recipe from a page or prompt
#[derive(Error, Debug)]
pub enum ImportError {
    /// URL did not use an http/https scheme
    #[error("Invalid URL '{0}': only http and https schemes are supported")]
    InvalidInput(String),

    /// Page could not be fetched (timeout, HTTP error status, network error)
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Neither structured data nor page text yielded anything to work with
    #[error("No extractable content found at {0}")]
    NoExtractableContent(String),

    /// Model output could not be parsed as JSON even after the repair sequence
    #[error("Malformed model output: {error} (excerpt: {excerpt})")]
    MalformedOutput { error: String, excerpt: String },

    /// No JSON object or array found anywhere in the model output
    #[error("No JSON object or array found in model output")]
    NoJsonFound,

    /// The generative-text service call itself failed
    #[error("AI service call failed: {0}")]
    AiServiceFailed(String),

    /// Error parsing HTTP headers
    #[error("Header parse error: {0}")]
    HeaderError(#[from] reqwest::header::InvalidHeaderValue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
