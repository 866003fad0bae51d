//! Zip extraction for driver archives
//!
//! Modern archives wrap the driver binary in a `chromedriver-<platform>/`
//! folder; legacy archives hold it at the zip root. When every entry shares
//! a single root folder it is stripped during extraction, so both layouts
//! unpack to a flat `<major>.0/` directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Refusing to extract unsafe path {0:?}")]
    UnsafePath(String),
}

/// Extracts a zip archive into `dest_dir`, creating it if absent.
///
/// Entries with absolute paths or parent-directory components are rejected
/// rather than extracted.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<(), ArchiveError> {
    let file = std::fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    std::fs::create_dir_all(dest_dir)?;

    let strip_prefix = find_common_root(&mut archive);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let Some(entry_path) = entry.enclosed_name() else {
            return Err(ArchiveError::UnsafePath(entry.name().to_string()));
        };
        if entry_path.is_absolute()
            || entry_path
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ArchiveError::UnsafePath(entry_path.display().to_string()));
        }

        let relative = match &strip_prefix {
            Some(prefix) => match entry_path.strip_prefix(prefix) {
                Ok(stripped) if stripped.as_os_str().is_empty() => continue,
                Ok(stripped) => stripped.to_path_buf(),
                Err(_) => entry_path.clone(),
            },
            None => entry_path.clone(),
        };

        let output_path = dest_dir.join(&relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&output_path)?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut outfile = std::fs::File::create(&output_path)?;
        std::io::copy(&mut entry, &mut outfile)?;

        // Restore the executable bit on the driver binary.
        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&output_path, std::fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(())
}

/// Returns the single folder wrapping every archive entry, if there is one.
///
/// A file at the archive root means there is no wrapping folder.
fn find_common_root(archive: &mut zip::ZipArchive<std::fs::File>) -> Option<PathBuf> {
    let mut root: Option<PathBuf> = None;

    for i in 0..archive.len() {
        let entry = archive.by_index(i).ok()?;
        let path = entry.enclosed_name()?;

        let mut components = path.components();
        let first = PathBuf::from(components.next()?.as_os_str());
        if components.next().is_none() && !entry.is_dir() {
            return None;
        }

        match &root {
            None => root = Some(first),
            Some(existing) if *existing == first => {}
            Some(_) => return None,
        }
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn wrapped_archives_have_their_root_folder_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("driver.zip");
        write_zip(
            &archive_path,
            &[
                ("chromedriver-win64/chromedriver.exe", b"binary"),
                ("chromedriver-win64/LICENSE.chromedriver", b"license"),
            ],
        );

        let dest = temp_dir.path().join("out");
        extract_zip(&archive_path, &dest).unwrap();

        assert!(dest.join("chromedriver.exe").is_file());
        assert!(dest.join("LICENSE.chromedriver").is_file());
        assert!(!dest.join("chromedriver-win64").exists());
    }

    #[test]
    fn flat_archives_extract_as_is() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("driver.zip");
        write_zip(&archive_path, &[("chromedriver.exe", b"binary")]);

        let dest = temp_dir.path().join("out");
        extract_zip(&archive_path, &dest).unwrap();

        assert!(dest.join("chromedriver.exe").is_file());
    }

    #[test]
    fn mixed_root_entries_are_not_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("driver.zip");
        write_zip(
            &archive_path,
            &[
                ("chromedriver", b"binary"),
                ("docs/notes.txt", b"notes"),
            ],
        );

        let dest = temp_dir.path().join("out");
        extract_zip(&archive_path, &dest).unwrap();

        assert!(dest.join("chromedriver").is_file());
        assert!(dest.join("docs").join("notes.txt").is_file());
    }

    #[test]
    fn parent_directory_entries_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("evil.zip");
        write_zip(&archive_path, &[("../evil.txt", b"payload")]);

        let dest = temp_dir.path().join("out");
        let result = extract_zip(&archive_path, &dest);

        assert!(matches!(result, Err(ArchiveError::UnsafePath(_))));
        assert!(!temp_dir.path().join("evil.txt").exists());
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = extract_zip(
            &temp_dir.path().join("nope.zip"),
            &temp_dir.path().join("out"),
        );

        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }
}
