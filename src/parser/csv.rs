//! CSV file parser

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::model::{CellValue, Column, Table};

use super::Parser;

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim();
                Column::new(
                    if name.is_empty() {
                        format!("Column{}", i + 1)
                    } else {
                        name.to_string()
                    },
                    i,
                )
            })
            .collect();

        let mut table = Table::new(columns);

        for result in csv_reader.records() {
            let record = result?;
            let cells: Vec<CellValue> = record
                .iter()
                .map(|s| parse_cell_value(s, config.trim_cells))
                .collect();
            table.push_row(cells);
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("csv")
    }
}

/// Parse a string value into a CellValue with type inference
pub(crate) fn parse_cell_value(s: &str, trim: bool) -> CellValue {
    let value = if trim { s.trim() } else { s };

    // Empty and the pandas-style markers read as missing
    if value.trim().is_empty()
        || value.eq_ignore_ascii_case("null")
        || value == "NA"
    {
        return CellValue::Null;
    }

    if value.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = value.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = value.parse::<f64>() {
        return CellValue::Float(f);
    }

    CellValue::String(Cow::Owned(value.to_string()))
}
