//! Filename validation applied before any file is opened or saved

use std::path::Path;

use crate::error::{Error, Result};

/// Extensions accepted for reading.
pub const OPEN_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Extensions accepted for writing. Legacy `.xls` is read-only.
pub const SAVE_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// Lowercased extension of a path, empty if none.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn validate_base_name(path: &Path) -> Result<()> {
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if base.is_empty() {
        return Err(Error::invalid_filename(path, "no filename provided"));
    }
    if base.contains(' ') {
        return Err(Error::invalid_filename(
            path,
            "filename should not contain spaces",
        ));
    }
    if base != base.trim() {
        return Err(Error::invalid_filename(
            path,
            "filename should not have leading or trailing whitespace",
        ));
    }
    Ok(())
}

/// Validate a path to be opened for reading: well-formed name, supported
/// extension, and the file must exist.
pub fn validate_open_path(path: &Path) -> Result<()> {
    validate_base_name(path)?;
    let ext = extension(path);
    if !OPEN_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::UnsupportedFormat { extension: ext });
    }
    if !path.exists() {
        return Err(Error::invalid_filename(path, "file does not exist"));
    }
    Ok(())
}

/// Validate a destination path: well-formed name and a writable extension.
/// Existence is not required.
pub fn validate_save_path(path: &Path) -> Result<()> {
    validate_base_name(path)?;
    let ext = extension(path);
    if !SAVE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::UnsupportedFormat { extension: ext });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rejects_spaces_in_base_name() {
        let err = validate_save_path(&PathBuf::from("out put.csv")).unwrap_err();
        assert!(matches!(err, Error::InvalidFilename { .. }));
        // Spaces in parent directories are fine
        assert!(validate_save_path(&PathBuf::from("some dir/output.csv")).is_ok());
    }

    #[test]
    fn rejects_unsupported_extensions() {
        let err = validate_save_path(&PathBuf::from("data.parquet")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        // xls reads but does not write
        assert!(validate_save_path(&PathBuf::from("data.xls")).is_err());
    }

    #[test]
    fn open_requires_existing_file() {
        let err = validate_open_path(&PathBuf::from("definitely-not-here.csv")).unwrap_err();
        assert!(matches!(err, Error::InvalidFilename { .. }));
    }
}
