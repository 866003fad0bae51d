//! Catalog source trait for fetching upstream version catalogs

#[cfg(test)]
use mockall::automock;

use crate::catalog::types::{ParsedCatalog, Source};
use crate::remote::error::SourceError;

/// Trait for fetching one upstream catalog
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Which upstream this source represents
    fn source(&self) -> Source;

    /// Fetches the raw catalog and parses it into canonical records
    ///
    /// # Returns
    /// * `Ok(ParsedCatalog)` - Parsed records plus skipped-entry diagnostics
    /// * `Err(SourceError)` - If the fetch fails or the document is
    ///   structurally unreadable
    async fn fetch_catalog(&self) -> Result<ParsedCatalog, SourceError>;
}
