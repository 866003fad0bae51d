//! Dotted numeric version ordering
//!
//! ChromeDriver versions are four-component dotted tuples like
//! `114.0.5735.90`, which semver cannot represent. [`DriverVersion`] keeps
//! the original string for display and compares component-wise.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid version string: {0:?}")]
pub struct InvalidVersion(pub String);

/// A driver version: one or more dot-separated decimal components.
///
/// Ordering is numeric per component, most significant first. Versions of
/// different lengths compare as if padded with trailing zeros, so `115.0`
/// equals `115.0.0.0`.
#[derive(Debug, Clone)]
pub struct DriverVersion {
    components: Vec<u64>,
    raw: String,
}

impl DriverVersion {
    /// The leading component, used for directory grouping
    pub fn major(&self) -> u64 {
        self.components[0]
    }

    /// The original dotted string
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for DriverVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Splitting always yields at least one part, and an empty part
        // fails the numeric parse, so `components` is never empty.
        let components = s
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()
            .map_err(|_| InvalidVersion(s.to_string()))?;

        Ok(Self {
            components,
            raw: s.to_string(),
        })
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for DriverVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for DriverVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows the padded ordering rather than the raw string, so that
// Ord and Eq agree on versions like "115.0" and "115.0.0.0".
impl PartialEq for DriverVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DriverVersion {}
