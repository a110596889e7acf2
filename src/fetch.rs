use log::info;
use reqwest::header::{HeaderMap, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

use crate::error::ImportError;

const USER_AGENT_STRING: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 RecipeImport/1.0";

/// Fetches page markup over HTTP with a bounded timeout.
///
/// Browser-like headers keep recipe sites from serving the bot-blocked
/// variant of their pages.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()?,
        );
        headers.insert(ACCEPT_LANGUAGE, "en-US,en;q=0.5".parse()?);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_STRING)
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { client })
    }

    /// Fetch a page, following redirects. Returns the decoded body and the
    /// final URL after redirects.
    pub async fn fetch(&self, url: &str) -> Result<(String, String), ImportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_failure(url, &e))?;

        let final_url = response.url().to_string();

        let response = response.error_for_status().map_err(|e| {
            let status = e
                .status()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            ImportError::FetchFailed {
                url: url.to_string(),
                reason: format!("the website responded with status {status}"),
            }
        })?;

        let content = response
            .text()
            .await
            .map_err(|e| fetch_failure(url, &e))?;

        info!("Fetched {url} (final URL: {final_url})");
        Ok((content, final_url))
    }
}

fn fetch_failure(url: &str, error: &reqwest::Error) -> ImportError {
    let reason = if error.is_timeout() {
        "the request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    };
    ImportError::FetchFailed {
        url: url.to_string(),
        reason,
    }
}
