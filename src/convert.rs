//! Format conversion with a read-back integrity check

use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::load_table;
use crate::writer::save_table;

/// Convert a table file to another format, inferring both formats from the
/// extensions. After writing, the output is read back and compared with the
/// original; on mismatch the output file is removed and the conversion
/// fails, so a bad conversion leaves nothing behind.
pub fn convert(input: &Path, output: &Path, config: &Config) -> Result<()> {
    let original = load_table(input, config)?;
    save_table(&original, output, config)?;

    let converted = load_table(output, config)?;
    if converted != original {
        fs::remove_file(output)?;
        return Err(Error::IntegrityCheckFailed(output.to_path_buf()));
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        rows = original.row_count(),
        "converted file"
    );
    Ok(())
}
