//! Configuration for table loading and saving

/// Options consumed by the parser and writer layers.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// For Excel files: which sheet to read. Defaults to the first sheet.
    pub sheet_name: Option<String>,
    /// Trim surrounding whitespace from CSV cells before type inference.
    pub trim_cells: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            trim_cells: true,
            ..Default::default()
        }
    }

    /// Set the Excel sheet to read
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Enable or disable CSV cell trimming
    pub fn with_trim_cells(mut self, trim: bool) -> Self {
        self.trim_cells = trim;
        self
    }
}
