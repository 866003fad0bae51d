//! Local driver directory scanning

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Lists the major-version directories present under `root`.
///
/// Only immediate subdirectories count: each directory name (e.g. `114.0`)
/// signals that the major's artifact is believed present, and whatever the
/// directory contains is irrelevant to the scan. A missing or unreadable
/// root means nothing has been downloaded yet and yields an empty set.
pub fn scan_present_majors(root: &Path) -> HashSet<String> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(
                "Driver directory {} is not readable ({err}); treating as empty",
                root.display()
            );
            return HashSet::new();
        }
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_root_yields_an_empty_set() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("does-not-exist");

        assert!(scan_present_majors(&root).is_empty());
    }

    #[test]
    fn immediate_subdirectories_are_reported_by_name() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("114.0")).unwrap();
        std::fs::create_dir(temp_dir.path().join("115.0")).unwrap();

        let present = scan_present_majors(temp_dir.path());

        assert_eq!(
            present,
            HashSet::from(["114.0".to_string(), "115.0".to_string()])
        );
    }

    #[test]
    fn plain_files_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("114.0")).unwrap();
        std::fs::write(temp_dir.path().join("LATEST.txt"), "114").unwrap();

        let present = scan_present_majors(temp_dir.path());

        assert_eq!(present, HashSet::from(["114.0".to_string()]));
    }

    #[test]
    fn nested_directories_are_not_recursed_into() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("114.0").join("old")).unwrap();

        let present = scan_present_majors(temp_dir.path());

        assert_eq!(present, HashSet::from(["114.0".to_string()]));
    }
}
