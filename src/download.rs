//! HTTP download and unpack of driver archives
//!
//! Each archive is streamed to a temporary file inside its target major
//! directory, retried on transient failure, renamed into place, and then
//! extracted with [`extract_zip`].

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::archive::extract_zip;
use crate::catalog::types::VersionRecord;
use crate::config::USER_AGENT;
use crate::reconcile::{DownloadError, DriverDownloader};

/// Maximum number of download attempts per archive
const MAX_RETRIES: u32 = 3;

/// Base delay between attempts; doubles on each retry
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Request timeout per attempt
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Archive file name while a download is in flight
const ARCHIVE_NAME: &str = "chromedriver.zip";

/// Streaming downloader for driver archives
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Streams `url` into `dest` via a sibling temp file, retrying
    /// transient failures with exponential backoff.
    async fn fetch_with_retry(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let temp_path = dest.with_extension("zip.part");

        let mut attempt = 0;
        loop {
            match self.fetch_archive(url, &temp_path).await {
                Ok(()) => {
                    tokio::fs::rename(&temp_path, dest).await?;
                    return Ok(());
                }
                Err(err) => {
                    let _ = tokio::fs::remove_file(&temp_path).await;
                    attempt += 1;
                    if attempt >= MAX_RETRIES {
                        return Err(err);
                    }
                    let delay = BASE_RETRY_DELAY_MS * 2u64.pow(attempt - 1);
                    debug!(
                        "Download attempt {attempt}/{MAX_RETRIES} failed: {err}; \
                         retrying in {delay}ms"
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
            }
        }
    }

    async fn fetch_archive(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status,
                url: url.to_string(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DriverDownloader for HttpDownloader {
    async fn download(
        &self,
        record: &VersionRecord,
        output_dir: &Path,
    ) -> Result<(), DownloadError> {
        let target_dir = output_dir.join(record.major_dir_name());
        tokio::fs::create_dir_all(&target_dir).await?;

        let archive_path = target_dir.join(ARCHIVE_NAME);
        self.fetch_with_retry(&record.download_url, &archive_path)
            .await?;

        extract_zip(&archive_path, &target_dir)
            .map_err(|err| DownloadError::Archive(err.to_string()))?;
        tokio::fs::remove_file(&archive_path).await?;

        info!(
            "ChromeDriver {} unpacked into {}",
            record.version,
            target_dir.display()
        );
        Ok(())
    }
}
