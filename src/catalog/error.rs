use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("Malformed modern catalog: {0}")]
    MalformedCatalog(#[from] serde_json::Error),

    #[error("Malformed legacy listing: missing ListBucketResult container")]
    MalformedListing,
}
