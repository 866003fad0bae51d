use thiserror::Error;

use crate::catalog::error::CatalogParseError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error(transparent)]
    Parse(#[from] CatalogParseError),
}
