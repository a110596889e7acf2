use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Page fetch timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Cap on the plain-text excerpt handed to the LLM, in characters
    #[serde(default = "default_max_excerpt_chars")]
    pub max_excerpt_chars: usize,
    /// Defaults applied to recipe fields the source did not provide
    #[serde(default)]
    pub defaults: RecipeDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_excerpt_chars: default_max_excerpt_chars(),
            defaults: RecipeDefaults::default(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.0-flash", "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Fallback values for recipe fields missing from the source
#[derive(Debug, Deserialize, Clone)]
pub struct RecipeDefaults {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

impl Default for RecipeDefaults {
    fn default() -> Self {
        Self {
            title: default_title(),
            servings: default_servings(),
            category: default_category(),
            difficulty: default_difficulty(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_max_excerpt_chars() -> usize {
    75_000
}

fn default_title() -> String {
    "Untitled Recipe".to_string()
}

fn default_servings() -> u32 {
    2
}

fn default_category() -> String {
    "Uncategorised".to_string()
}

fn default_difficulty() -> String {
    "Medium".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPE_IMPORT__PROVIDERS__GOOGLE__API_KEY
            .add_source(
                Environment::with_prefix("RECIPE_IMPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
