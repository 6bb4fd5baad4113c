//! Parser layer for reading tabular data files

mod csv;
mod excel;

use std::path::Path;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::paths;

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

pub(crate) use self::csv::parse_cell_value;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension.
///
/// Format selection is purely by extension string match; no content sniffing.
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(ExcelParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = paths::extension(path);
        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }
        Err(Error::UnsupportedFormat { extension: ext })
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        parser.parse(path, config)
    }
}

/// Load a table from disk, validating the path first.
pub fn load_table(path: &Path, config: &Config) -> Result<Table> {
    paths::validate_open_path(path)?;
    ParserFactory::new().parse(path, config)
}
