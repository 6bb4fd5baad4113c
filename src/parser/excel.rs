//! Excel file parser (xlsx, xls)

use std::borrow::Cow;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{CellValue, Column, Table};

use super::Parser;

/// Parser for Excel files
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = match config.sheet_name {
            Some(ref name) => name.clone(),
            None => {
                // First sheet only
                let sheets = workbook.sheet_names();
                sheets
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::ExcelRead(calamine::Error::Msg("no sheets in workbook")))?
            }
        };

        let range: Range<Data> = workbook.worksheet_range(&sheet_name)?;

        parse_range(&range)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "xlsx" | "xls")
    }
}

fn parse_range(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();

    let header_row = rows
        .next()
        .ok_or_else(|| Error::ExcelRead(calamine::Error::Msg("sheet has no header row")))?;
    let columns: Vec<Column> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell_to_string(cell);
            Column::new(
                if name.is_empty() {
                    format!("Column{}", i + 1)
                } else {
                    name
                },
                i,
            )
        })
        .collect();

    let mut table = Table::new(columns);

    for row in rows {
        // Calamine ranges are dense: every row slice spans the full range
        // width, with Data::Empty for unset cells, so data rows are never
        // wider than the header. The take() only restates that bound.
        let cells: Vec<CellValue> = row
            .iter()
            .take(table.column_count())
            .map(convert_cell)
            .collect();
        table.push_row(cells);
    }

    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format!("{dt}"),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() || s == "NA" {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::Float(f) => {
            // Excel stores every number as a float
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{e:?}"))),
    }
}
