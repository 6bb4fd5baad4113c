//! Concurrent file search across mounted volumes
//!
//! One worker thread per volume, fan-in over a channel. A volume whose root
//! cannot be read is reported as a per-volume failure without aborting its
//! siblings; unreadable subdirectories are skipped and counted.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Result of searching a single volume.
#[derive(Debug)]
pub struct VolumeOutcome {
    pub volume: PathBuf,
    pub matches: Vec<PathBuf>,
    /// Directories that could not be read and were skipped
    pub skipped_dirs: usize,
}

/// A volume that could not be searched at all.
#[derive(Debug)]
pub struct VolumeFailure {
    pub volume: PathBuf,
    pub error: String,
}

/// Aggregated search result across every volume.
#[derive(Debug, Default)]
pub struct SearchReport {
    pub matches: BTreeSet<PathBuf>,
    pub failures: Vec<VolumeFailure>,
    pub skipped_dirs: usize,
}

/// What a finished worker reports: the volume's outcome, or why it failed.
pub type VolumeStatus<'a> = std::result::Result<&'a VolumeOutcome, &'a VolumeFailure>;

/// Enumerate accessible top-level volumes.
#[cfg(windows)]
pub fn volumes() -> Vec<PathBuf> {
    (b'A'..=b'Z')
        .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
        .filter(|p| p.exists())
        .collect()
}

/// Enumerate accessible top-level volumes.
#[cfg(not(windows))]
pub fn volumes() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/")];
    if let Ok(entries) = fs::read_dir("/mnt") {
        for entry in entries.flatten() {
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                roots.push(entry.path());
            }
        }
    }
    roots
}

/// Search every mounted volume for files whose base name matches `filename`
/// exactly. `on_complete` is invoked once per finished volume, whether the
/// volume searched cleanly or failed outright.
pub fn search(
    filename: &str,
    on_complete: impl Fn(VolumeStatus<'_>) + Sync,
) -> Result<SearchReport> {
    search_volumes(&volumes(), filename, on_complete)
}

/// Search the given roots concurrently, one worker per root.
pub fn search_volumes(
    roots: &[PathBuf],
    filename: &str,
    on_complete: impl Fn(VolumeStatus<'_>) + Sync,
) -> Result<SearchReport> {
    info!(?roots, filename, "starting file search");

    let mut report = SearchReport::default();
    let (tx, rx) = mpsc::channel::<std::result::Result<VolumeOutcome, VolumeFailure>>();

    thread::scope(|scope| {
        for root in roots {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send(search_volume(root, filename));
            });
        }
        drop(tx);

        // Fan-in; completion order is whatever the workers produce.
        for outcome in rx {
            match outcome {
                Ok(outcome) => {
                    debug!(
                        volume = %outcome.volume.display(),
                        matches = outcome.matches.len(),
                        skipped = outcome.skipped_dirs,
                        "volume search complete"
                    );
                    on_complete(Ok(&outcome));
                    report.matches.extend(outcome.matches);
                    report.skipped_dirs += outcome.skipped_dirs;
                }
                Err(failure) => {
                    warn!(
                        volume = %failure.volume.display(),
                        error = %failure.error,
                        "volume search failed"
                    );
                    on_complete(Err(&failure));
                    report.failures.push(failure);
                }
            }
        }
    });

    if report.matches.is_empty() {
        return Err(Error::NoFilesFound(filename.to_string()));
    }
    Ok(report)
}

fn search_volume(
    root: &Path,
    filename: &str,
) -> std::result::Result<VolumeOutcome, VolumeFailure> {
    // An unreadable root fails the volume; anything deeper is just skipped.
    let entries = fs::read_dir(root).map_err(|e| VolumeFailure {
        volume: root.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut outcome = VolumeOutcome {
        volume: root.to_path_buf(),
        matches: Vec::new(),
        skipped_dirs: 0,
    };
    walk_entries(entries, filename, &mut outcome);
    Ok(outcome)
}

fn walk_entries(entries: fs::ReadDir, filename: &str, outcome: &mut VolumeOutcome) {
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            // Symlinked directories are not followed
            match fs::read_dir(entry.path()) {
                Ok(children) => walk_entries(children, filename, outcome),
                Err(_) => outcome.skipped_dirs += 1,
            }
        } else if file_type.is_file() && entry.file_name().to_string_lossy() == filename {
            outcome.matches.push(entry.path());
        }
    }
}
