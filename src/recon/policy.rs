//! Merge policies chosen by the user during reconciliation

use std::str::FromStr;

/// What to do with columns present only in the first table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraColumnPolicy {
    /// Drop the columns entirely
    Remove,
    /// Keep the columns but blank out their values
    Fill,
    /// Keep the columns untouched
    Keep,
}

impl FromStr for ExtraColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remove" => Ok(ExtraColumnPolicy::Remove),
            "fill" => Ok(ExtraColumnPolicy::Fill),
            "keep" => Ok(ExtraColumnPolicy::Keep),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}

/// Whether to copy columns that only exist in the second table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewColumnPolicy {
    /// Add the columns, values joined by key
    Include,
    /// Leave the first table's schema alone
    Skip,
}

impl FromStr for NewColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "include" => Ok(NewColumnPolicy::Include),
            "no" | "skip" => Ok(NewColumnPolicy::Skip),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}

/// Whether to append rows whose keys only exist in the second table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewRowPolicy {
    Append,
    Skip,
}

impl FromStr for NewRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "append" => Ok(NewRowPolicy::Append),
            "no" | "skip" => Ok(NewRowPolicy::Skip),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}

/// What to do with rows whose keys are absent from the second table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRowPolicy {
    /// Keep the rows as they are
    Keep,
    /// Blank every non-key field of the rows
    Set,
}

impl FromStr for MissingRowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(MissingRowPolicy::Keep),
            "set" => Ok(MissingRowPolicy::Set),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}
