//! Reconciliation of the resolved catalog against local state
//!
//! [`find_missing`] diffs the resolved candidate list against the set of
//! major directories observed on disk; [`download_missing`] drives an
//! injected [`DriverDownloader`] over the diff with partial-failure
//! semantics: every candidate is attempted and the aggregate report lists
//! successes and failures side by side.

use std::collections::HashSet;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::types::VersionRecord;

/// Failure downloading or unpacking a single artifact
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive extraction failed: {0}")]
    Archive(String),
}

/// Download collaborator invoked once per missing record
///
/// Implementations place the unpacked artifact under
/// `<output_dir>/<major>.0/`; downloads for distinct records must not
/// interfere with each other's target directories.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DriverDownloader: Send + Sync {
    /// Fetches and unpacks one record into `output_dir`
    async fn download(
        &self,
        record: &VersionRecord,
        output_dir: &Path,
    ) -> Result<(), DownloadError>;
}

/// Aggregate result of downloading the missing records
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub downloaded: Vec<VersionRecord>,
    pub failed: Vec<(VersionRecord, DownloadError)>,
}

/// Filters `candidates` down to records whose major directory is absent
/// locally.
///
/// Candidates are expected to be filtered and ordered upstream; their order
/// is preserved. With a latest-per-major candidate list the result contains
/// at most one record per major.
pub fn find_missing(
    candidates: &[VersionRecord],
    present: &HashSet<String>,
) -> Vec<VersionRecord> {
    candidates
        .iter()
        .filter(|record| !present.contains(&record.major_dir_name()))
        .cloned()
        .collect()
}

/// Attempts to download every missing record, collecting per-record
/// outcomes. A failed download never aborts the remaining candidates.
pub async fn download_missing(
    missing: Vec<VersionRecord>,
    output_dir: &Path,
    downloader: &dyn DriverDownloader,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for record in missing {
        info!(
            "Downloading ChromeDriver {} ({}/{})",
            record.version,
            record.platform.as_str(),
            record.arch.as_str()
        );
        match downloader.download(&record, output_dir).await {
            Ok(()) => report.downloaded.push(record),
            Err(err) => {
                warn!("Download failed for {}: {err}", record.version);
                report.failed.push((record, err));
            }
        }
    }

    report
}
