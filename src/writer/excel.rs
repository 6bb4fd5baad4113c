//! Excel file writer (xlsx)

use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::config::Config;
use crate::error::Result;
use crate::model::{CellValue, Table};

use super::Writer;

/// Writer for xlsx workbooks; the table lands on a single sheet.
pub struct ExcelWriter;

impl Writer for ExcelWriter {
    fn write(&self, table: &Table, path: &Path, config: &Config) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if let Some(ref name) = config.sheet_name {
            worksheet.set_name(name)?;
        }

        for (col_idx, column) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, &column.name)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.cells.iter().enumerate() {
                let col = col_idx as u16;
                match cell {
                    CellValue::Null => {}
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(excel_row, col, *b)?;
                    }
                    CellValue::Int(i) => {
                        // xlsx stores every number as an IEEE double, so
                        // integers beyond 2^53 lose precision in this format.
                        worksheet.write_number(excel_row, col, *i as f64)?;
                    }
                    CellValue::Float(f) => {
                        worksheet.write_number(excel_row, col, *f)?;
                    }
                    CellValue::String(s) => {
                        worksheet.write_string(excel_row, col, s.as_ref())?;
                    }
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("xlsx")
    }
}
