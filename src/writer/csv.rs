//! CSV file writer

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::model::Table;

use super::Writer;

/// Writer for CSV files (comma-delimited, header row, UTF-8)
pub struct CsvWriter;

impl Writer for CsvWriter {
    fn write(&self, table: &Table, path: &Path, _config: &Config) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(table.columns.iter().map(|c| c.name.as_str()))?;
        for row in &table.rows {
            writer.write_record(row.cells.iter().map(|c| c.display().into_owned()))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("csv")
    }
}
