//! Adapter for the Chrome-for-Testing JSON index
//!
//! The index is a single document with a top-level `versions` array; each
//! entry carries per-binary download lists keyed by platform. Only the
//! chromedriver downloads are of interest here.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::error::CatalogParseError;
use crate::catalog::types::{Arch, ParsedCatalog, Platform, SkippedEntry, Source, VersionRecord};
use crate::catalog::version::DriverVersion;

/// Top-level shape of `known-good-versions-with-downloads.json`
#[derive(Debug, Deserialize)]
struct KnownGoodVersions {
    versions: Vec<serde_json::Value>,
}

/// One version entry of the index
#[derive(Debug, Deserialize)]
struct VersionEntry {
    version: String,
    #[serde(default)]
    downloads: Downloads,
}

#[derive(Debug, Default, Deserialize)]
struct Downloads {
    #[serde(default)]
    chromedriver: Vec<DownloadEntry>,
}

#[derive(Debug, Deserialize)]
struct DownloadEntry {
    platform: String,
    url: String,
}

/// Maps a Chrome-for-Testing platform key to the canonical platform/arch pair.
///
/// Mac builds exist upstream but are not supported targets; their keys map
/// to `None` and the entries are skipped.
fn map_platform_key(key: &str) -> Option<(Platform, Arch)> {
    match key {
        "win32" => Some((Platform::Windows, Arch::X86)),
        "win64" => Some((Platform::Windows, Arch::X64)),
        "linux64" => Some((Platform::Linux, Arch::X64)),
        _ => None,
    }
}

/// Parses the modern JSON index into canonical records.
///
/// Malformed individual entries and entries without chromedriver downloads
/// are skipped; only a document whose top level is not the expected
/// versions list fails the parse.
pub fn parse_modern_catalog(raw: &str) -> Result<ParsedCatalog, CatalogParseError> {
    let index: KnownGoodVersions = serde_json::from_str(raw)?;

    let mut catalog = ParsedCatalog::default();
    for value in index.versions {
        let entry: VersionEntry = match serde_json::from_value(value.clone()) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping malformed catalog entry: {err}");
                catalog.skipped.push(SkippedEntry {
                    entry: value.to_string(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let Ok(version) = entry.version.parse::<DriverVersion>() else {
            warn!("Skipping entry with malformed version {:?}", entry.version);
            catalog.skipped.push(SkippedEntry {
                entry: entry.version,
                reason: "malformed version string".to_string(),
            });
            continue;
        };

        for download in entry.downloads.chromedriver {
            let Some((platform, arch)) = map_platform_key(&download.platform) else {
                debug!(
                    "Skipping unsupported platform {} for version {}",
                    download.platform, version
                );
                catalog.skipped.push(SkippedEntry {
                    entry: format!("{}/{}", version, download.platform),
                    reason: "unsupported platform key".to_string(),
                });
                continue;
            };

            catalog.records.push(VersionRecord {
                version: version.clone(),
                platform,
                arch,
                source: Source::Modern,
                download_url: download.url,
            });
        }
    }

    Ok(catalog)
}
