//! Run log loading
//!
//! Accepts log files and directories. A directory contributes its `*.json`
//! files (non-recursive, sorted by name) so a whole study output folder can be
//! passed at once.

use crate::record::RunRecord;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded record and the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecord {
    pub source: PathBuf,
    pub record: RunRecord,
}

/// Expand directories into their JSON log files
pub fn collect_log_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry
                    .with_context(|| format!("Failed to read entry in {}", path.display()))?;
                let candidate = entry.path();
                if candidate.is_file() && candidate.extension().is_some_and(|ext| ext == "json") {
                    found.push(candidate);
                }
            }
            found.sort();
            tracing::debug!(
                directory = %path.display(),
                files = found.len(),
                "expanded log directory"
            );
            files.extend(found);
        } else {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Read every record from a single log file
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>> {
    let path = path.as_ref();

    if !path.exists() {
        bail!("Run log not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read run log {}", path.display()))?;

    RunRecord::from_json_str(&contents)
        .with_context(|| format!("Invalid run log JSON in {}", path.display()))
}

/// Load all records from the given files and directories, in order
pub fn load_records<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<LoadedRecord>> {
    if paths.is_empty() {
        bail!("No run logs given");
    }

    let files = collect_log_files(paths)?;
    if files.is_empty() {
        bail!("No *.json run logs found in the given directories");
    }

    let mut loaded = Vec::new();
    for file in files {
        let records = load_file(&file)?;
        tracing::trace!(file = %file.display(), records = records.len(), "loaded run log");
        loaded.extend(records.into_iter().map(|record| LoadedRecord {
            source: file.clone(),
            record,
        }));
    }

    Ok(loaded)
}
