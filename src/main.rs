//! tablekit - compare, merge, convert, and generate tabular data files

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use tracing_subscriber::EnvFilter;

use tablekit::config::Config;
use tablekit::generate::{self, ColumnKind};
use tablekit::parser::load_table;
use tablekit::paths;
use tablekit::prompt::{ConsolePrompter, Prompter};
use tablekit::recon::reconcile;
use tablekit::search;
use tablekit::writer::save_table;

/// Compare, merge, convert, and generate tabular data files (CSV, Excel)
#[derive(Parser, Debug)]
#[command(name = "tablekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Update a table from a second table, resolving differences interactively
    Reconcile {
        /// File to update
        file1: PathBuf,
        /// File to compare against
        file2: PathBuf,
        /// Key column present in both files
        #[arg(short, long)]
        key: String,
        /// Where to save the merged table (.csv or .xlsx)
        #[arg(short, long)]
        output: PathBuf,
        /// For Excel inputs: which sheet to read
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Convert a file between CSV and Excel, verifying the data survives
    Convert {
        /// Input file (.csv, .xls, or .xlsx)
        input: PathBuf,
        /// Output file (.csv or .xlsx)
        output: PathBuf,
        /// For Excel inputs: which sheet to read
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Edit a file in place: add or delete columns and rows interactively
    Modify {
        /// File to edit (.csv or .xlsx)
        file: PathBuf,
        /// For Excel inputs: which sheet to read
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Search every mounted volume for a filename
    Search {
        /// Exact base name to look for (with extension)
        filename: String,
    },
    /// Generate a file of dummy data
    Generate {
        /// Where to save the generated table (.csv or .xlsx)
        output: PathBuf,
        /// Number of rows to generate
        #[arg(short, long, default_value_t = 10)]
        rows: usize,
        /// Column specs as name:type (type: name, age, email, text, words)
        #[arg(short, long, value_delimiter = ',')]
        column: Vec<String>,
        /// Generate a predictable practice grid with this many columns instead
        #[arg(long, conflicts_with = "column")]
        practice: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Reconcile {
            file1,
            file2,
            key,
            output,
            sheet,
        } => run_reconcile(&file1, &file2, &key, &output, sheet),
        Command::Convert {
            input,
            output,
            sheet,
        } => {
            let mut config = Config::new();
            config.sheet_name = sheet;
            tablekit::convert::convert(&input, &output, &config)?;
            println!("Converted '{}' to '{}'.", input.display(), output.display());
            Ok(())
        }
        Command::Modify { file, sheet } => run_modify(&file, sheet),
        Command::Search { filename } => run_search(&filename),
        Command::Generate {
            output,
            rows,
            column,
            practice,
        } => run_generate(&output, rows, &column, practice),
    }
}

fn run_reconcile(
    file1: &Path,
    file2: &Path,
    key: &str,
    output: &Path,
    sheet: Option<String>,
) -> Result<()> {
    if file1 == file2 {
        bail!("cannot reconcile a file against itself");
    }
    paths::validate_save_path(output)?;

    let mut config = Config::new();
    config.sheet_name = sheet;

    let table1 = load_table(file1, &config)
        .with_context(|| format!("failed to load first file: {}", file1.display()))?;
    let table2 = load_table(file2, &config)
        .with_context(|| format!("failed to load second file: {}", file2.display()))?;

    let merged = reconcile(&table1, &table2, key, &ConsolePrompter)?;
    save_table(&merged, output, &config)
        .with_context(|| format!("failed to save merged file: {}", output.display()))?;

    println!("Updated file saved as '{}'.", output.display());
    Ok(())
}

fn run_modify(file: &Path, sheet: Option<String>) -> Result<()> {
    // The edited table is written back to the same path, so it has to be a
    // writable format before any editing starts.
    paths::validate_save_path(file)?;

    let mut config = Config::new();
    config.sheet_name = sheet;

    let table = load_table(file, &config)
        .with_context(|| format!("failed to load file: {}", file.display()))?;
    let edited = tablekit::modify::modify(&table, &ConsolePrompter)?;
    save_table(&edited, file, &config)
        .with_context(|| format!("failed to save file: {}", file.display()))?;

    println!("File '{}' updated.", file.display());
    Ok(())
}

/// Ask before replacing an existing file. Anything but an explicit yes
/// cancels.
fn confirm_overwrite(path: &Path, prompter: &dyn Prompter) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let prompt = format!(
        "The file '{}' already exists. Do you want to overwrite it? (yes/no):",
        path.display()
    );
    let overwrite = prompter
        .ask("Overwrite File", &prompt)
        .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
        .unwrap_or(false);
    if overwrite {
        Ok(())
    } else {
        Err(tablekit::Error::OperationCanceled(format!(
            "did not overwrite '{}'",
            path.display()
        ))
        .into())
    }
}

fn run_search(filename: &str) -> Result<()> {
    // Spinner on a side thread; the flag is set exactly once, when the
    // fan-in below completes.
    let done = Arc::new(AtomicBool::new(false));
    let spinner = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let frames = ['|', '/', '-', '\\'];
            let mut i = 0;
            while !done.load(Ordering::Relaxed) {
                eprint!("\rSearching for files {}", frames[i % frames.len()]);
                let _ = std::io::stderr().flush();
                i += 1;
                thread::sleep(Duration::from_millis(200));
            }
            eprintln!("\r                        \r");
        })
    };

    let result = search::search(filename, |status| {
        let volume = match status {
            Ok(outcome) => &outcome.volume,
            Err(failure) => &failure.volume,
        };
        eprintln!("\rCompleted search in: {}", volume.display());
    });
    done.store(true, Ordering::Relaxed);
    let _ = spinner.join();

    let report = result?;
    println!("Found files:");
    for path in &report.matches {
        println!("  {}", path.display());
    }
    for failure in &report.failures {
        println!(
            "warning: could not search {}: {}",
            failure.volume.display(),
            failure.error
        );
    }
    if report.skipped_dirs > 0 {
        println!(
            "note: {} unreadable directories were skipped",
            report.skipped_dirs
        );
    }
    Ok(())
}

fn run_generate(
    output: &Path,
    rows: usize,
    columns: &[String],
    practice: Option<usize>,
) -> Result<()> {
    paths::validate_save_path(output)?;
    confirm_overwrite(output, &ConsolePrompter)?;

    let table = if let Some(cols) = practice {
        generate::practice_table(rows, cols)
    } else {
        if columns.is_empty() {
            bail!("provide at least one --column name:type, or use --practice");
        }
        let mut spec = IndexMap::new();
        for entry in columns {
            let (name, tag) = entry
                .split_once(':')
                .with_context(|| format!("invalid column spec '{entry}', expected name:type"))?;
            spec.insert(name.trim().to_string(), ColumnKind::from_tag(tag));
        }
        generate::generate(rows, &spec)
    };

    save_table(&table, output, &Config::new())?;
    println!(
        "Generated {} records and saved to '{}'.",
        table.row_count(),
        output.display()
    );
    Ok(())
}
