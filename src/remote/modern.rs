//! Modern catalog source: the Chrome-for-Testing version index

use tracing::warn;

use crate::catalog::modern::parse_modern_catalog;
use crate::catalog::types::{ParsedCatalog, Source};
use crate::config::{MODERN_BASE_URL, USER_AGENT};
use crate::remote::error::SourceError;
use crate::remote::source::CatalogSource;

/// Index document listing known-good versions with their downloads
const INDEX_PATH: &str = "/known-good-versions-with-downloads.json";

/// Source implementation for the Chrome-for-Testing JSON index
pub struct ModernCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl ModernCatalogSource {
    /// Creates a source against a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ModernCatalogSource {
    fn default() -> Self {
        Self::new(MODERN_BASE_URL)
    }
}

#[async_trait::async_trait]
impl CatalogSource for ModernCatalogSource {
    fn source(&self) -> Source {
        Source::Modern
    }

    async fn fetch_catalog(&self) -> Result<ParsedCatalog, SourceError> {
        let url = format!("{}{}", self.base_url, INDEX_PATH);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Modern catalog returned status {status}: {url}");
            return Err(SourceError::Status { status, url });
        }

        let body = response.text().await?;
        Ok(parse_modern_catalog(&body)?)
    }
}
