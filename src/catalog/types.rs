//! Canonical catalog record types

use std::str::FromStr;

use crate::catalog::version::DriverVersion;

/// Target operating system of a driver build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            _ => Err(()),
        }
    }
}

/// Target architecture of a driver build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x64",
        }
    }
}

impl FromStr for Arch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Arch::X86),
            "x64" => Ok(Arch::X64),
            _ => Err(()),
        }
    }
}

/// Which upstream catalog produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Modern,
    Legacy,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Modern => "modern",
            Source::Legacy => "legacy",
        }
    }
}

/// One resolvable driver artifact
///
/// `(version, platform, arch)` uniquely identifies a download target in the
/// merged catalog; when both upstreams list that key, the modern record
/// survives.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecord {
    pub version: DriverVersion,
    pub platform: Platform,
    pub arch: Arch,
    pub source: Source,
    pub download_url: String,
}

impl VersionRecord {
    /// Name of the directory grouping this record's artifacts on disk
    pub fn major_dir_name(&self) -> String {
        format!("{}.0", self.version.major())
    }

    /// Merge identity within the combined catalog
    pub(crate) fn key(&self) -> (String, Platform, Arch) {
        (self.version.as_str().to_string(), self.platform, self.arch)
    }
}

/// Adapter output: parsed records plus the entries that were skipped.
///
/// Individual unparsable entries never fail a parse; they are collected here
/// for diagnostics instead.
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub records: Vec<VersionRecord>,
    pub skipped: Vec<SkippedEntry>,
}

/// One catalog entry that produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: String,
}
