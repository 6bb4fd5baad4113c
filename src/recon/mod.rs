//! Reconciliation engine
//!
//! Merges two tables keyed on a shared column. Every ambiguous category
//! (extra columns, new columns, new rows, missing rows) is resolved by asking
//! the [`Prompter`]; a declined or unrecognized answer aborts the whole
//! operation before anything is written. The engine itself is pure in-memory;
//! persisting the merged table is the caller's final step.

mod policy;

use std::str::FromStr;

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{CellValue, Row, Table};
use crate::prompt::Prompter;

pub use policy::{ExtraColumnPolicy, MissingRowPolicy, NewColumnPolicy, NewRowPolicy};

/// Reconciles a base table against a reference table.
pub struct Reconciler<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> Reconciler<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Merge `table2` into a copy of `table1` using `key_column` to match
    /// rows. Returns the merged table; neither input is modified.
    pub fn reconcile(&self, table1: &Table, table2: &Table, key_column: &str) -> Result<Table> {
        if table1.column_index(key_column).is_none() {
            return Err(Error::key_column_missing(key_column, "the first file"));
        }
        if table2.column_index(key_column).is_none() {
            return Err(Error::key_column_missing(key_column, "the second file"));
        }

        let mut result = table1.clone();
        let index2 = table2.key_index(key_column, "the second file")?;

        self.apply_extra_column_policy(&mut result, table2)?;

        // Row positions are stable from here on, so the key index holds for
        // the remaining steps.
        let index1 = result.key_index(key_column, "the first file")?;

        // Column value sync: keys present in both tables take the second
        // table's values; keys only in the first table stay untouched.
        let mut synced = 0usize;
        for (ci2, col2) in table2.columns.iter().enumerate() {
            if col2.name == key_column {
                continue;
            }
            let Some(ci1) = result.column_index(&col2.name) else {
                continue;
            };
            for (key, &r2) in &index2 {
                if let Some(&r1) = index1.get(key) {
                    result.rows[r1].cells[ci1] = table2.rows[r2].cells[ci2].clone();
                    synced += 1;
                }
            }
        }
        info!(cells = synced, "synced shared columns from the second file");

        self.apply_new_column_policy(&mut result, table2, key_column, &index2)?;
        self.apply_new_row_policy(&mut result, table2, key_column, &index1)?;
        self.apply_missing_row_policy(&mut result, key_column, &index2)?;

        Ok(result)
    }

    /// Ask for a policy, treating a canceled or unparsable answer as an
    /// abort of the whole operation.
    fn ask_policy<P>(&self, title: &str, prompt: &str, step: &str) -> Result<P>
    where
        P: FromStr<Err = String>,
    {
        let answer = self
            .prompter
            .ask(title, prompt)
            .ok_or_else(|| Error::OperationCanceled(format!("no choice given for {step}")))?;
        answer
            .parse()
            .map_err(|e| Error::OperationCanceled(format!("{step}: {e}")))
    }

    fn apply_extra_column_policy(&self, result: &mut Table, table2: &Table) -> Result<()> {
        let extra: Vec<String> = result
            .columns
            .iter()
            .filter(|c| table2.column_index(&c.name).is_none())
            .map(|c| c.name.clone())
            .collect();
        if extra.is_empty() {
            return Ok(());
        }

        let prompt = format!(
            "The following extra columns are in the first file:\n\n{}\n\n\
             Do you want to:\n\
             1. Remove these columns\n\
             2. Keep these columns and fill with missing values\n\
             3. Keep these columns without any change\n\n\
             Please type 'remove', 'fill', or 'keep':",
            extra.join(", ")
        );
        let policy: ExtraColumnPolicy =
            self.ask_policy("Extra Columns in File 1", &prompt, "extra columns")?;

        match policy {
            ExtraColumnPolicy::Remove => {
                for name in &extra {
                    result.remove_column(name);
                }
                info!(columns = ?extra, "removed extra columns from the first file");
            }
            ExtraColumnPolicy::Fill => {
                for name in &extra {
                    if let Some(idx) = result.column_index(name) {
                        for row in &mut result.rows {
                            row.cells[idx] = CellValue::Null;
                        }
                    }
                }
                info!(columns = ?extra, "filled extra columns with missing values");
            }
            ExtraColumnPolicy::Keep => {
                info!(columns = ?extra, "kept extra columns without change");
            }
        }
        Ok(())
    }

    fn apply_new_column_policy(
        &self,
        result: &mut Table,
        table2: &Table,
        key_column: &str,
        index2: &rustc_hash::FxHashMap<String, usize>,
    ) -> Result<()> {
        let new_cols: Vec<(usize, String)> = table2
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| result.column_index(&c.name).is_none())
            .map(|(i, c)| (i, c.name.clone()))
            .collect();
        if new_cols.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = new_cols.iter().map(|(_, n)| n.clone()).collect();
        let prompt = format!(
            "The following new columns are in the second file:\n\n{}\n\n\
             Do you want to include these columns in the first file?\n\
             (Type 'yes' to include or 'no' to skip):",
            names.join(", ")
        );
        let policy: NewColumnPolicy =
            self.ask_policy("New Columns from File 2", &prompt, "new columns")?;

        match policy {
            NewColumnPolicy::Include => {
                let key_idx = result
                    .column_index(key_column)
                    .ok_or_else(|| Error::key_column_missing(key_column, "the first file"))?;
                for (ci2, name) in new_cols {
                    let values: Vec<CellValue> = result
                        .rows
                        .iter()
                        .map(|row| {
                            row.get(key_idx)
                                .map(|k| k.display().into_owned())
                                .and_then(|k| index2.get(&k))
                                .map(|&r2| table2.rows[r2].cells[ci2].clone())
                                .unwrap_or(CellValue::Null)
                        })
                        .collect();
                    result.add_column(name, values);
                }
                info!(columns = ?names, "included new columns from the second file");
            }
            NewColumnPolicy::Skip => {
                info!(columns = ?names, "skipped new columns from the second file");
            }
        }
        Ok(())
    }

    fn apply_new_row_policy(
        &self,
        result: &mut Table,
        table2: &Table,
        key_column: &str,
        index1: &rustc_hash::FxHashMap<String, usize>,
    ) -> Result<()> {
        let key_idx2 = table2
            .column_index(key_column)
            .ok_or_else(|| Error::key_column_missing(key_column, "the second file"))?;
        let new_rows: Vec<&Row> = table2
            .rows
            .iter()
            .filter(|row| {
                row.get(key_idx2)
                    .map(|k| !index1.contains_key(k.display().as_ref()))
                    .unwrap_or(false)
            })
            .collect();
        if new_rows.is_empty() {
            return Ok(());
        }

        let prompt = format!(
            "There are {} rows in the second file not present in the first file.\n\n\
             Do you want to add these new rows to the first file?\n\
             (Type 'yes' to include or 'no' to skip):",
            new_rows.len()
        );
        let policy: NewRowPolicy = self.ask_policy("New Rows from File 2", &prompt, "new rows")?;

        match policy {
            NewRowPolicy::Append => {
                // Classified first, appended as one batch; the source rows
                // are never iterated while the result grows.
                let count = new_rows.len();
                let column_sources: Vec<Option<usize>> = result
                    .columns
                    .iter()
                    .map(|c| table2.column_index(&c.name))
                    .collect();
                let batch: Vec<Vec<CellValue>> = new_rows
                    .into_iter()
                    .map(|row| {
                        column_sources
                            .iter()
                            .map(|src| {
                                src.and_then(|ci2| row.get(ci2).cloned())
                                    .unwrap_or(CellValue::Null)
                            })
                            .collect()
                    })
                    .collect();
                for cells in batch {
                    result.push_row(cells);
                }
                info!(rows = count, "appended new rows from the second file");
            }
            NewRowPolicy::Skip => {
                info!("skipped new rows from the second file");
            }
        }
        Ok(())
    }

    fn apply_missing_row_policy(
        &self,
        result: &mut Table,
        key_column: &str,
        index2: &rustc_hash::FxHashMap<String, usize>,
    ) -> Result<()> {
        let key_idx = result
            .column_index(key_column)
            .ok_or_else(|| Error::key_column_missing(key_column, "the first file"))?;
        let missing: Vec<usize> = result
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.get(key_idx)
                    .map(|k| !index2.contains_key(k.display().as_ref()))
                    .unwrap_or(false)
            })
            .map(|(i, _)| i)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        let keys: Vec<String> = missing
            .iter()
            .filter_map(|&i| result.rows[i].get(key_idx))
            .map(|k| k.display().into_owned())
            .collect();
        let prompt = format!(
            "The following rows are in the first file but not in the second file:\n\n{}\n\n\
             Do you want to:\n\
             1. Keep these rows as is\n\
             2. Set the values in these rows to missing\n\n\
             Please type 'keep' or 'set':",
            keys.join(", ")
        );
        let policy: MissingRowPolicy =
            self.ask_policy("Missing Rows in File 2", &prompt, "missing rows")?;

        match policy {
            MissingRowPolicy::Keep => {
                info!(keys = ?keys, "kept missing rows as is");
            }
            MissingRowPolicy::Set => {
                for &i in &missing {
                    for (ci, cell) in result.rows[i].cells.iter_mut().enumerate() {
                        if ci != key_idx {
                            *cell = CellValue::Null;
                        }
                    }
                }
                info!(keys = ?keys, "set missing rows to missing values");
            }
        }
        Ok(())
    }
}

/// Convenience wrapper around [`Reconciler`].
pub fn reconcile(
    table1: &Table,
    table2: &Table,
    key_column: &str,
    prompter: &dyn Prompter,
) -> Result<Table> {
    Reconciler::new(prompter).reconcile(table1, table2, key_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn table(columns: &[&str], rows: &[&[CellValue]]) -> Table {
        let mut t = Table::with_column_names(columns.iter().copied());
        for row in rows {
            t.push_row(row.to_vec());
        }
        t
    }

    fn int(i: i64) -> CellValue {
        CellValue::Int(i)
    }

    fn s(v: &str) -> CellValue {
        CellValue::from(v)
    }

    #[test]
    fn syncs_appends_and_keeps_per_key() {
        // table1 = {id:[1,2], a:[10,20]}, table2 = {id:[2,3], a:[99,30]}
        let t1 = table(&["id", "a"], &[&[int(1), int(10)], &[int(2), int(20)]]);
        let t2 = table(&["id", "a"], &[&[int(2), int(99)], &[int(3), int(30)]]);

        // append new rows, keep missing rows
        let prompter = ScriptedPrompter::new([Some("yes"), Some("keep")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();

        assert_eq!(merged.column_names(), vec!["id", "a"]);
        assert_eq!(merged.row_count(), 3);
        assert_eq!(merged.rows[0].cells, vec![int(1), int(10)]); // untouched
        assert_eq!(merged.rows[1].cells, vec![int(2), int(99)]); // synced
        assert_eq!(merged.rows[2].cells, vec![int(3), int(30)]); // appended
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn missing_key_column_fails_before_any_prompt() {
        let t1 = table(&["id", "a"], &[&[int(1), int(10)]]);
        let t2 = table(&["key", "a"], &[&[int(1), int(10)]]);
        let prompter = ScriptedPrompter::default();

        let err = reconcile(&t1, &t2, "id", &prompter).unwrap_err();
        assert!(matches!(err, Error::KeyColumnMissing { .. }));

        let err = reconcile(&t2, &t1, "key", &prompter).unwrap_err();
        assert!(matches!(err, Error::KeyColumnMissing { .. }));
    }

    #[test]
    fn blank_or_invalid_answer_aborts() {
        let t1 = table(&["id", "extra"], &[&[int(1), s("x")]]);
        let t2 = table(&["id"], &[&[int(1)]]);

        // Canceled prompt
        let prompter = ScriptedPrompter::new([None]);
        let err = reconcile(&t1, &t2, "id", &prompter).unwrap_err();
        assert!(matches!(err, Error::OperationCanceled(_)));

        // Unrecognized answer
        let prompter = ScriptedPrompter::new([Some("whatever")]);
        let err = reconcile(&t1, &t2, "id", &prompter).unwrap_err();
        assert!(matches!(err, Error::OperationCanceled(_)));
    }

    #[test]
    fn extra_columns_removed_or_filled() {
        let t1 = table(&["id", "extra"], &[&[int(1), s("x")], &[int(2), s("y")]]);
        let t2 = table(&["id"], &[&[int(1)], &[int(2)]]);

        let prompter = ScriptedPrompter::new([Some("remove")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();
        assert_eq!(merged.column_names(), vec!["id"]);
        assert_eq!(merged.rows[0].cells, vec![int(1)]);

        let prompter = ScriptedPrompter::new([Some("fill")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();
        assert_eq!(merged.column_names(), vec!["id", "extra"]);
        assert_eq!(merged.rows[1].cells, vec![int(2), CellValue::Null]);

        let prompter = ScriptedPrompter::new([Some("keep")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();
        assert_eq!(merged.rows[1].cells, vec![int(2), s("y")]);
    }

    #[test]
    fn new_columns_joined_by_key() {
        let t1 = table(&["id", "a"], &[&[int(1), int(10)], &[int(2), int(20)]]);
        let t2 = table(
            &["id", "a", "b"],
            &[&[int(2), int(99), s("two")], &[int(3), int(30), s("three")]],
        );

        // include new columns, skip new rows
        let prompter = ScriptedPrompter::new([Some("yes"), Some("no"), Some("keep")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();

        assert_eq!(merged.column_names(), vec!["id", "a", "b"]);
        assert_eq!(merged.row_count(), 2);
        assert_eq!(merged.rows[0].cells, vec![int(1), int(10), CellValue::Null]);
        assert_eq!(merged.rows[1].cells, vec![int(2), int(99), s("two")]);
    }

    #[test]
    fn missing_rows_blanked_on_set() {
        let t1 = table(&["id", "a"], &[&[int(1), int(10)], &[int(2), int(20)]]);
        let t2 = table(&["id", "a"], &[&[int(2), int(99)]]);

        let prompter = ScriptedPrompter::new([Some("set")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();

        assert_eq!(merged.rows[0].cells, vec![int(1), CellValue::Null]);
        assert_eq!(merged.rows[1].cells, vec![int(2), int(99)]);
    }

    #[test]
    fn no_prompts_when_tables_align() {
        let t1 = table(&["id", "a"], &[&[int(1), int(10)]]);
        let t2 = table(&["id", "a"], &[&[int(1), int(42)]]);

        let prompter = ScriptedPrompter::default();
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();
        assert_eq!(merged.rows[0].cells, vec![int(1), int(42)]);
    }

    #[test]
    fn append_aligns_cells_to_result_columns() {
        // table2 has its columns in a different order
        let t1 = table(&["id", "a", "z"], &[&[int(1), int(10), s("zz")]]);
        let t2 = table(&["a", "id"], &[&[int(50), int(5)]]);

        // extra column 'z': keep; new row 5: append; missing row 1: keep
        let prompter = ScriptedPrompter::new([Some("keep"), Some("yes"), Some("keep")]);
        let merged = reconcile(&t1, &t2, "id", &prompter).unwrap();

        assert_eq!(merged.row_count(), 2);
        assert_eq!(
            merged.rows[1].cells,
            vec![int(5), int(50), CellValue::Null]
        );
    }
}
