//! tablekit - compare, merge, convert, and generate tabular data files
//!
//! A toolkit for working with human-scale CSV and Excel files: key-column
//! reconciliation of two tables, interactive editing of a single file,
//! format conversion with an integrity check,
//! a concurrent file search across mounted volumes, and a dummy data
//! generator.

pub mod config;
pub mod convert;
pub mod error;
pub mod generate;
pub mod model;
pub mod modify;
pub mod parser;
pub mod paths;
pub mod prompt;
pub mod recon;
pub mod search;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use model::Table;
