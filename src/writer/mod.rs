//! Writer layer for saving tables to disk

mod csv;
mod excel;

use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::paths;

pub use self::csv::CsvWriter;
pub use self::excel::ExcelWriter;

/// Trait for writing tables to a file format
pub trait Writer: Send + Sync {
    /// Write the table to the given path
    fn write(&self, table: &Table, path: &Path, config: &Config) -> Result<()>;

    /// Check if this writer can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating writers based on the output path's extension
pub struct WriterFactory {
    writers: Vec<Box<dyn Writer>>,
}

impl Default for WriterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterFactory {
    pub fn new() -> Self {
        Self {
            writers: vec![Box::new(CsvWriter), Box::new(ExcelWriter)],
        }
    }

    /// Get a writer for the given file path
    pub fn get_writer(&self, path: &Path) -> Result<&dyn Writer> {
        let ext = paths::extension(path);
        for writer in &self.writers {
            if writer.supports_extension(&ext) {
                return Ok(writer.as_ref());
            }
        }
        Err(Error::UnsupportedFormat { extension: ext })
    }
}

/// Save a table, inferring the format from the output path's extension.
///
/// The table is written to a temporary file in the destination directory and
/// renamed into place once the write succeeds, so a failed save never leaves
/// a partial output file behind.
pub fn save_table(table: &Table, path: &Path, config: &Config) -> Result<()> {
    paths::validate_save_path(path)?;
    let factory = WriterFactory::new();
    let writer = factory.get_writer(path)?;

    // Stage in the destination directory so the final rename stays on one
    // filesystem.
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let tmp: NamedTempFile = tempfile::Builder::new()
        .prefix(".tablekit-")
        .suffix(&tmp_suffix(path))
        .tempfile_in(dir)?;

    writer.write(table, tmp.path(), config)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

// Staging files carry the destination's extension.
fn tmp_suffix(path: &Path) -> String {
    format!(".{}", paths::extension(path))
}
