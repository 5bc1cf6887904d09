//! Reading a work order and its machine logs from disk.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use frametally_common::LogIdentity;
use frametally_parser::{dialect_for, merge, parse_locations, CanonicalRecord, MergedRecord};

/// One machine log, reconciled against the work order.
#[derive(Debug, Clone)]
pub struct ReconciledLog {
    pub identity: LogIdentity,
    pub path: PathBuf,
    pub records: Vec<MergedRecord>,
    /// Lines the dialect could not read.
    pub skipped_lines: usize,
}

/// A work order together with every log that could be read.
#[derive(Debug, Clone)]
pub struct Batch {
    pub work_order: CanonicalRecord,
    /// In argument order.
    pub logs: Vec<ReconciledLog>,
}

impl Batch {
    /// `YYYYMMDD` of the last log, used to name CSV output.
    pub fn output_date(&self) -> Option<String> {
        self.logs.last().map(|log| log.identity.date_token())
    }
}

/// Derive a log's identity from its file name.
pub fn identify(path: &Path) -> Result<LogIdentity> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Log path has no usable file name: {:?}", path))?;

    name.parse::<LogIdentity>()
        .with_context(|| format!("Unrecognised log file name: {}", name))
}

/// Read and reconcile one log.
pub fn reconcile_log(work_order: &CanonicalRecord, path: &Path) -> Result<ReconciledLog> {
    let identity = identify(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {:?}", path))?;

    let dialect = dialect_for(identity.machine);
    let log = dialect.parse(&text);
    let records = merge(work_order, &log, dialect);

    tracing::info!(
        log = %identity,
        paths = log.len(),
        records = records.len(),
        "Reconciled machine log"
    );

    Ok(ReconciledLog {
        identity,
        path: path.to_path_buf(),
        records,
        skipped_lines: log.skipped_lines(),
    })
}

/// Load the work order and reconcile each log against it.
///
/// Logs that cannot be identified or read are skipped with a warning.
/// Fails when the work order is unusable or no log survives.
pub fn load_batch(xytech: &Path, files: &[PathBuf]) -> Result<Batch> {
    let text = std::fs::read_to_string(xytech)
        .with_context(|| format!("Failed to read work order: {:?}", xytech))?;
    let work_order = parse_locations(&text)
        .with_context(|| format!("Failed to parse work order: {:?}", xytech))?;

    tracing::debug!(
        locations = work_order.locations().len(),
        attributes = work_order.len(),
        "Parsed work order"
    );

    let mut logs = Vec::with_capacity(files.len());
    for path in files {
        match reconcile_log(&work_order, path) {
            Ok(log) => {
                if log.skipped_lines > 0 {
                    tracing::warn!(
                        log = %log.identity,
                        "Ignored {} unreadable lines in {:?}",
                        log.skipped_lines,
                        log.path
                    );
                }
                logs.push(log);
            }
            Err(e) => tracing::warn!("Skipping {:?}: {:#}", path, e),
        }
    }

    if logs.is_empty() {
        bail!("No readable machine logs to reconcile");
    }

    Ok(Batch { work_order, logs })
}
