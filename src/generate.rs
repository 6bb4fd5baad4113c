//! Dummy data generator

use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::model::{CellValue, Table};

const FIRST_NAMES: &[&str] = &[
    "Alice", "Benjamin", "Carla", "Daniel", "Elena", "Felix", "Grace", "Hugo", "Isabel", "James",
    "Katherine", "Liam", "Maria", "Noah", "Olivia", "Patrick", "Quinn", "Rosa", "Samuel", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Brooks", "Chen", "Delgado", "Evans", "Fischer", "Garcia", "Hoffman", "Ivanov",
    "Jensen", "Keller", "Lopez", "Murphy", "Nguyen", "Olsen", "Petrov", "Quintero", "Rossi",
    "Schmidt", "Tanaka",
];

const WORDS: &[&str] = &[
    "ledger", "harbor", "signal", "meadow", "copper", "lantern", "orchard", "ribbon", "summit",
    "timber", "velvet", "willow", "anchor", "bramble", "cinder", "drift", "ember", "fable",
    "garnet", "hollow",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.test"];

/// Semantic tag describing how a column's values are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Name,
    Age,
    Email,
    Text,
    /// Generic fallback: random words
    Words,
}

impl ColumnKind {
    /// Map a user-supplied tag to a generator. Unknown tags fall back to
    /// random words with a warning; this never fails.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "name" => ColumnKind::Name,
            "age" => ColumnKind::Age,
            "email" => ColumnKind::Email,
            "text" => ColumnKind::Text,
            "words" | "word" | "other" => ColumnKind::Words,
            other => {
                warn!(tag = other, "unknown column type, falling back to random words");
                ColumnKind::Words
            }
        }
    }

    fn generate(&self, rng: &mut impl Rng) -> CellValue {
        match self {
            ColumnKind::Name => CellValue::from(full_name(rng)),
            ColumnKind::Age => CellValue::Int(rng.gen_range(18..=70)),
            ColumnKind::Email => CellValue::from(email(rng)),
            ColumnKind::Text => CellValue::from(short_text(rng)),
            ColumnKind::Words => CellValue::from(word(rng).to_string()),
        }
    }
}

fn word(rng: &mut impl Rng) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("word")
}

fn full_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
    format!("{first} {last}")
}

fn email(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("smith");
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(1..100),
        domain
    )
}

fn short_text(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(2..=4);
    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        parts.push(word(rng));
    }
    parts.join(" ")
}

/// Generate a table of dummy rows from an insertion-ordered column spec.
pub fn generate(row_count: usize, spec: &IndexMap<String, ColumnKind>) -> Table {
    let mut rng = rand::thread_rng();
    let mut table = Table::with_column_names(spec.keys().map(String::as_str));
    for _ in 0..row_count {
        let cells = spec.values().map(|kind| kind.generate(&mut rng)).collect();
        table.push_row(cells);
    }
    table
}

/// Generate a practice grid: columns `Column1..N` with predictable
/// `SampleData_{col}_{row}` cells.
pub fn practice_table(row_count: usize, column_count: usize) -> Table {
    let names: Vec<String> = (1..=column_count).map(|i| format!("Column{i}")).collect();
    let mut table = Table::with_column_names(names);
    for row in 1..=row_count {
        let cells = (1..=column_count)
            .map(|col| CellValue::from(format!("SampleData_{col}_{row}")))
            .collect();
        table.push_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(entries: &[(&str, ColumnKind)]) -> IndexMap<String, ColumnKind> {
        entries
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect()
    }

    #[test]
    fn generates_requested_shape() {
        let spec = spec(&[
            ("full_name", ColumnKind::Name),
            ("age", ColumnKind::Age),
            ("email", ColumnKind::Email),
        ]);
        let table = generate(25, &spec);

        assert_eq!(table.row_count(), 25);
        assert_eq!(table.column_names(), vec!["full_name", "age", "email"]);
        for row in &table.rows {
            match &row.cells[1] {
                CellValue::Int(age) => assert!((18..=70).contains(age)),
                other => panic!("expected integer age, got {other:?}"),
            }
            assert!(row.cells[2].display().contains('@'));
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_words() {
        assert_eq!(ColumnKind::from_tag("ZIP code"), ColumnKind::Words);
        assert_eq!(ColumnKind::from_tag("Name"), ColumnKind::Name);
        assert_eq!(ColumnKind::from_tag(" AGE "), ColumnKind::Age);

        let spec = spec(&[("notes", ColumnKind::from_tag("nonsense"))]);
        let table = generate(3, &spec);
        assert_eq!(table.row_count(), 3);
        assert!(!table.rows[0].cells[0].is_null());
    }

    #[test]
    fn practice_table_is_predictable() {
        let table = practice_table(2, 3);
        assert_eq!(table.column_names(), vec!["Column1", "Column2", "Column3"]);
        assert_eq!(table.rows[1].cells[2], CellValue::from("SampleData_3_2"));
    }
}
