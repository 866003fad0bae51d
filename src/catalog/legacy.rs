//! Adapter for the legacy chromedriver storage bucket
//!
//! The legacy upstream is an S3 bucket listing: a `ListBucketResult`
//! document enumerating object keys. Driver archives follow the
//! `<version>/chromedriver_<platform>.zip` naming scheme; everything else in
//! the bucket (release pointers, notes, icons) is unrelated and skipped.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::error::CatalogParseError;
use crate::catalog::types::{Arch, ParsedCatalog, Platform, SkippedEntry, Source, VersionRecord};
use crate::catalog::version::DriverVersion;

/// Root element of an S3 bucket listing
const CONTAINER_MARKER: &str = "<ListBucketResult";

/// Matches one `<Key>` element; object keys are URL-safe names and never
/// contain nested markup.
fn key_element() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<Key>([^<]+)</Key>").expect("static regex"))
}

/// Matches the legacy driver archive naming scheme
fn driver_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)*)/chromedriver_(win32|win64|linux32|linux64)\.zip$")
            .expect("static regex")
    })
}

fn map_platform_key(key: &str) -> Option<(Platform, Arch)> {
    match key {
        "win32" => Some((Platform::Windows, Arch::X86)),
        "win64" => Some((Platform::Windows, Arch::X64)),
        "linux32" => Some((Platform::Linux, Arch::X86)),
        "linux64" => Some((Platform::Linux, Arch::X64)),
        _ => None,
    }
}

/// Parses a legacy bucket listing into canonical records.
///
/// Keys that do not match the driver archive naming scheme are skipped;
/// only a document without the `ListBucketResult` container fails the
/// parse. Download URLs are formed by joining each key onto `base_url`.
pub fn parse_legacy_listing(
    raw: &str,
    base_url: &str,
) -> Result<ParsedCatalog, CatalogParseError> {
    if !raw.contains(CONTAINER_MARKER) {
        return Err(CatalogParseError::MalformedListing);
    }

    let base_url = base_url.trim_end_matches('/');
    let mut catalog = ParsedCatalog::default();

    for capture in key_element().captures_iter(raw) {
        let key = &capture[1];

        let Some(parts) = driver_key().captures(key) else {
            debug!("Ignoring non-driver listing key {key:?}");
            catalog.skipped.push(SkippedEntry {
                entry: key.to_string(),
                reason: "not a driver archive key".to_string(),
            });
            continue;
        };

        // The scheme regex guarantees dotted decimals, but components can
        // still overflow u64.
        let Ok(version) = parts[1].parse::<DriverVersion>() else {
            catalog.skipped.push(SkippedEntry {
                entry: key.to_string(),
                reason: "malformed version string".to_string(),
            });
            continue;
        };

        let Some((platform, arch)) = map_platform_key(&parts[2]) else {
            continue;
        };

        catalog.records.push(VersionRecord {
            version,
            platform,
            arch,
            source: Source::Legacy,
            download_url: format!("{base_url}/{key}"),
        });
    }

    Ok(catalog)
}
