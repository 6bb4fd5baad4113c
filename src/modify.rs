//! Interactive modification of an existing table
//!
//! Walks the user through four optional edits (add columns, delete columns,
//! add rows, delete rows) against an in-memory table. Like reconciliation,
//! the result is pure in-memory and a canceled prompt aborts the whole
//! operation before the caller writes anything back.

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{CellValue, Table};
use crate::parser::parse_cell_value;
use crate::prompt::Prompter;

/// Applies user-directed edits to a table.
pub struct Modifier<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> Modifier<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Run the edit dialog against a copy of `table` and return the edited
    /// table. The input is not modified.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        let mut result = table.clone();

        if self.ask_yes_no("Do you want to add new columns? (yes/no):", "add columns")? {
            self.add_columns(&mut result)?;
        }
        if self.ask_yes_no("Do you want to delete columns? (yes/no):", "delete columns")? {
            self.delete_columns(&mut result)?;
        }
        if self.ask_yes_no("Do you want to add new rows? (yes/no):", "add rows")? {
            self.add_rows(&mut result)?;
        }
        if self.ask_yes_no("Do you want to delete rows? (yes/no):", "delete rows")? {
            self.delete_rows(&mut result)?;
        }

        Ok(result)
    }

    fn ask(&self, prompt: &str, step: &str) -> Result<String> {
        self.prompter
            .ask("Modify File", prompt)
            .ok_or_else(|| Error::OperationCanceled(format!("no answer given for {step}")))
    }

    fn ask_yes_no(&self, prompt: &str, step: &str) -> Result<bool> {
        match self.ask(prompt, step)?.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(true),
            "no" | "n" => Ok(false),
            other => Err(Error::OperationCanceled(format!(
                "{step}: unknown choice '{other}'"
            ))),
        }
    }

    fn add_columns(&self, table: &mut Table) -> Result<()> {
        let names = self.ask(
            "Enter the names of the new columns, separated by commas:",
            "new column names",
        )?;
        let defaults = self.ask(
            "Enter default values for each column, separated by commas \
             (leave a value blank for missing):",
            "new column defaults",
        )?;

        let names: Vec<&str> = names.split(',').map(str::trim).collect();
        let defaults: Vec<&str> = defaults.split(',').map(str::trim).collect();
        if names.len() != defaults.len() {
            return Err(Error::OperationCanceled(format!(
                "the number of column names ({}) must match the number of default values ({})",
                names.len(),
                defaults.len()
            )));
        }

        for (name, default) in names.into_iter().zip(defaults) {
            let value = parse_cell_value(default, true);
            if let Some(idx) = table.column_index(name) {
                // Existing column: the default overwrites every cell
                for row in &mut table.rows {
                    row.cells[idx] = value.clone();
                }
                info!(column = name, "overwrote existing column with default value");
            } else {
                let values = vec![value; table.row_count()];
                table.add_column(name, values);
                info!(column = name, "added new column");
            }
        }
        Ok(())
    }

    fn delete_columns(&self, table: &mut Table) -> Result<()> {
        let names = self.ask(
            "Enter the names of the columns to delete, separated by commas:",
            "columns to delete",
        )?;
        for name in names.split(',').map(str::trim) {
            if table.column_index(name).is_some() {
                table.remove_column(name);
                info!(column = name, "deleted column");
            } else {
                warn!(column = name, "column does not exist, nothing to delete");
            }
        }
        Ok(())
    }

    fn add_rows(&self, table: &mut Table) -> Result<()> {
        let count = self.ask("Enter the number of new rows to add:", "new row count")?;
        let count: usize = count.trim().parse().map_err(|_| {
            Error::OperationCanceled(format!("new row count: expected a number, got '{count}'"))
        })?;

        for i in 0..count {
            let prompt = format!(
                "Enter values for new row {} of {count}, separated by commas\n\
                 (column order: {}):",
                i + 1,
                table.column_names().join(", ")
            );
            let answer = self.ask(&prompt, "new row values")?;
            let mut cells: Vec<CellValue> = answer
                .split(',')
                .map(|v| parse_cell_value(v, true))
                .collect();
            cells.truncate(table.column_count());
            table.push_row(cells);
        }
        if count > 0 {
            info!(rows = count, "added new rows");
        }
        Ok(())
    }

    fn delete_rows(&self, table: &mut Table) -> Result<()> {
        let answer = self.ask(
            "Enter the indices of the rows to delete, separated by commas (first row is 0):",
            "rows to delete",
        )?;
        let mut indices = Vec::new();
        for part in answer.split(',').map(str::trim) {
            let idx: usize = part.parse().map_err(|_| {
                Error::OperationCanceled(format!(
                    "rows to delete: expected a row index, got '{part}'"
                ))
            })?;
            indices.push(idx);
        }

        // Indices refer to the table as the user saw it, so deletion happens
        // in one pass from the highest index down.
        indices.sort_unstable();
        indices.dedup();
        for &idx in indices.iter().rev() {
            if idx < table.row_count() {
                table.rows.remove(idx);
                info!(row = idx, "deleted row");
            } else {
                warn!(row = idx, "row index out of range, nothing to delete");
            }
        }
        Ok(())
    }
}

/// Convenience wrapper around [`Modifier`].
pub fn modify(table: &Table, prompter: &dyn Prompter) -> Result<Table> {
    Modifier::new(prompter).apply(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn sample() -> Table {
        let mut t = Table::with_column_names(["id", "name"]);
        t.push_row(vec![CellValue::Int(1), CellValue::from("alice")]);
        t.push_row(vec![CellValue::Int(2), CellValue::from("bob")]);
        t
    }

    #[test]
    fn adds_columns_with_defaults() {
        // add columns: city gets a default, notes stays missing
        let prompter = ScriptedPrompter::new([
            Some("yes"),
            Some("city,notes"),
            Some("London,"),
            Some("no"),
            Some("no"),
            Some("no"),
        ]);
        let edited = modify(&sample(), &prompter).unwrap();

        assert_eq!(edited.column_names(), vec!["id", "name", "city", "notes"]);
        assert_eq!(edited.rows[0].cells[2], CellValue::from("London"));
        assert_eq!(edited.rows[1].cells[3], CellValue::Null);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn mismatched_defaults_abort() {
        let prompter = ScriptedPrompter::new([Some("yes"), Some("a,b"), Some("only-one")]);
        let err = modify(&sample(), &prompter).unwrap_err();
        assert!(matches!(err, Error::OperationCanceled(_)));
    }

    #[test]
    fn deletes_known_columns_and_skips_unknown() {
        let prompter = ScriptedPrompter::new([
            Some("no"),
            Some("yes"),
            Some("name,ghost"),
            Some("no"),
            Some("no"),
        ]);
        let edited = modify(&sample(), &prompter).unwrap();

        assert_eq!(edited.column_names(), vec!["id"]);
        assert_eq!(edited.rows[0].cells, vec![CellValue::Int(1)]);
    }

    #[test]
    fn adds_rows_from_comma_separated_values() {
        let prompter = ScriptedPrompter::new([
            Some("no"),
            Some("no"),
            Some("yes"),
            Some("2"),
            Some("3,carol"),
            Some("4"),
            Some("no"),
        ]);
        let edited = modify(&sample(), &prompter).unwrap();

        assert_eq!(edited.row_count(), 4);
        assert_eq!(
            edited.rows[2].cells,
            vec![CellValue::Int(3), CellValue::from("carol")]
        );
        // Short row padded with missing
        assert_eq!(edited.rows[3].cells, vec![CellValue::Int(4), CellValue::Null]);
    }

    #[test]
    fn deletes_rows_by_original_indices() {
        let prompter = ScriptedPrompter::new([
            Some("no"),
            Some("no"),
            Some("no"),
            Some("yes"),
            Some("0, 7"),
        ]);
        let edited = modify(&sample(), &prompter).unwrap();

        // Row 0 removed; out-of-range 7 ignored
        assert_eq!(edited.row_count(), 1);
        assert_eq!(edited.rows[0].cells[0], CellValue::Int(2));
    }

    #[test]
    fn canceled_prompt_aborts_without_result() {
        let prompter = ScriptedPrompter::new([Some("no"), None]);
        let err = modify(&sample(), &prompter).unwrap_err();
        assert!(matches!(err, Error::OperationCanceled(_)));

        let prompter = ScriptedPrompter::new([Some("maybe")]);
        let err = modify(&sample(), &prompter).unwrap_err();
        assert!(matches!(err, Error::OperationCanceled(_)));
    }
}
