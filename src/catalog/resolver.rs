//! Merge, filter, and order the combined catalog

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::catalog::types::{Arch, Platform, Source, VersionRecord};

/// Filter configuration for catalog resolution.
///
/// `None` on platform, arch, or version means "any". Resolution with a
/// filter that matches nothing is a valid empty outcome, not an error.
#[derive(Debug, Clone)]
pub struct VersionFilter {
    pub platform: Option<Platform>,
    pub arch: Option<Arch>,
    /// Dotted version prefix ("114" matches "114.0.5735.90" but not
    /// "1140.0") or an exact version string.
    pub version: Option<String>,
    /// Include legacy-source records
    pub include_legacy: bool,
    /// Reduce to the single newest record per major version
    pub latest_only: bool,
}

impl Default for VersionFilter {
    fn default() -> Self {
        Self {
            platform: None,
            arch: None,
            version: None,
            include_legacy: true,
            latest_only: false,
        }
    }
}

impl VersionFilter {
    fn matches(&self, record: &VersionRecord) -> bool {
        if !self.include_legacy && record.source == Source::Legacy {
            return false;
        }
        if let Some(platform) = self.platform {
            if record.platform != platform {
                return false;
            }
        }
        if let Some(arch) = self.arch {
            if record.arch != arch {
                return false;
            }
        }
        if let Some(wanted) = &self.version {
            if !version_matches(record.version.as_str(), wanted) {
                return false;
            }
        }
        true
    }
}

/// Exact match, or prefix match ending on a dot boundary.
fn version_matches(version: &str, wanted: &str) -> bool {
    if version == wanted {
        return true;
    }
    version.starts_with(wanted) && version.as_bytes().get(wanted.len()) == Some(&b'.')
}

/// Merges both upstreams' records and applies the filter.
///
/// Records are deduplicated by `(version, platform, arch)` with the modern
/// source taking precedence, then ordered ascending by version, platform,
/// and architecture. The output is deterministic for identical inputs.
pub fn resolve(
    modern: Vec<VersionRecord>,
    legacy: Vec<VersionRecord>,
    filter: &VersionFilter,
) -> Vec<VersionRecord> {
    // Modern records are inserted first, so they win every key collision.
    let mut merged: IndexMap<(String, Platform, Arch), VersionRecord> = IndexMap::new();
    for record in modern.into_iter().chain(legacy) {
        merged.entry(record.key()).or_insert(record);
    }

    let mut records: Vec<VersionRecord> = merged
        .into_values()
        .filter(|record| filter.matches(record))
        .collect();

    if filter.latest_only {
        records = latest_per_major(records);
    }

    records.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.platform.cmp(&b.platform))
            .then_with(|| a.arch.cmp(&b.arch))
    });
    records
}

/// Keeps exactly one record per distinct major: the greatest version, with
/// ties on identical versions resolved toward the modern source and then a
/// stable platform/arch order.
fn latest_per_major(records: Vec<VersionRecord>) -> Vec<VersionRecord> {
    let mut best: IndexMap<u64, VersionRecord> = IndexMap::new();
    for record in records {
        match best.entry(record.version.major()) {
            indexmap::map::Entry::Occupied(mut slot) => {
                if supersedes(&record, slot.get()) {
                    slot.insert(record);
                }
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }
    best.into_values().collect()
}

fn supersedes(candidate: &VersionRecord, current: &VersionRecord) -> bool {
    match candidate.version.cmp(&current.version) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            if candidate.source != current.source {
                return candidate.source == Source::Modern;
            }
            (candidate.platform, candidate.arch) < (current.platform, current.arch)
        }
    }
}
