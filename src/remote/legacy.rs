//! Legacy catalog source: the chromedriver storage bucket listing

use tracing::warn;

use crate::catalog::legacy::parse_legacy_listing;
use crate::catalog::types::{ParsedCatalog, Source};
use crate::config::{LEGACY_BASE_URL, USER_AGENT};
use crate::remote::error::SourceError;
use crate::remote::source::CatalogSource;

/// Source implementation for the legacy S3 bucket listing
pub struct LegacyCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl LegacyCatalogSource {
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

impl Default for LegacyCatalogSource {
    fn default() -> Self {
        Self::new(LEGACY_BASE_URL)
    }
}

#[async_trait::async_trait]
impl CatalogSource for LegacyCatalogSource {
    fn source(&self) -> Source {
        Source::Legacy
    }

    async fn fetch_catalog(&self) -> Result<ParsedCatalog, SourceError> {
        let url = format!("{}/?prefix=", self.base_url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Legacy listing returned status {status}: {url}");
            return Err(SourceError::Status { status, url });
        }

        let body = response.text().await?;
        Ok(parse_legacy_listing(&body, &self.base_url)?)
    }
}
