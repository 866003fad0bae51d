//! Upstream catalog sources
//!
//! One [`CatalogSource`] per upstream, each owning its endpoint and the
//! matching adapter. [`fetch_combined`] gathers both upstreams' records for
//! the resolver while tolerating a single-source failure.

pub mod error;
pub mod legacy;
pub mod modern;
pub mod source;

pub use error::SourceError;
pub use legacy::LegacyCatalogSource;
pub use modern::ModernCatalogSource;
pub use source::CatalogSource;

use tracing::{debug, warn};

use crate::catalog::types::{ParsedCatalog, Source, VersionRecord};

/// Records fetched from both upstreams, plus any per-source failures
#[derive(Debug, Default)]
pub struct CombinedCatalog {
    pub modern: Vec<VersionRecord>,
    pub legacy: Vec<VersionRecord>,
    pub failures: Vec<(Source, SourceError)>,
}

/// Fetches both catalogs, tolerating per-source failures.
///
/// A source that fails to fetch or parse contributes no records; its failure
/// is recorded and the other source still participates in resolution. Pass
/// `None` for `legacy` to skip the legacy upstream entirely. The caller
/// decides whether recorded failures are fatal.
pub async fn fetch_combined(
    modern: &dyn CatalogSource,
    legacy: Option<&dyn CatalogSource>,
) -> CombinedCatalog {
    let mut combined = CombinedCatalog::default();

    combined.modern = fetch_one(modern, &mut combined.failures).await;
    if let Some(legacy) = legacy {
        combined.legacy = fetch_one(legacy, &mut combined.failures).await;
    }

    combined
}

async fn fetch_one(
    source: &dyn CatalogSource,
    failures: &mut Vec<(Source, SourceError)>,
) -> Vec<VersionRecord> {
    match source.fetch_catalog().await {
        Ok(ParsedCatalog { records, skipped }) => {
            if !skipped.is_empty() {
                debug!(
                    "{} catalog: {} entries skipped during parsing",
                    source.source().as_str(),
                    skipped.len()
                );
            }
            records
        }
        Err(err) => {
            warn!(
                "Failed to fetch {} catalog: {err}",
                source.source().as_str()
            );
            failures.push((source.source(), err));
            Vec::new()
        }
    }
}
