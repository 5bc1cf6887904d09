//! Persisting a reconciled batch.

use anyhow::{Context, Result};
use frametally_db::pool::{get_conn, DbPool};
use frametally_db::queries::{employees, frames};

use crate::ingest::Batch;

/// Rows written by [`store_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub logs: usize,
    pub frames: usize,
}

/// OS user running the ingest, from `$USER` or `$USERNAME`.
pub fn script_runner() -> String {
    ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Write one employee row per log and one frame row per merged record.
pub fn store_batch(pool: &DbPool, batch: &Batch, runner: &str) -> Result<StoreSummary> {
    let conn = get_conn(pool)?;
    let mut summary = StoreSummary::default();

    for log in &batch.logs {
        let identity = &log.identity;
        employees::insert_employee(
            &conn,
            runner,
            identity.machine,
            &identity.user,
            identity.date,
        )
        .with_context(|| format!("Failed to record log {}", identity))?;

        summary.frames += frames::insert_frames(&conn, &identity.user, identity.date, &log.records)
            .with_context(|| format!("Failed to store frames for {}", identity))?;
        summary.logs += 1;

        tracing::debug!(log = %identity, records = log.records.len(), "Stored log");
    }

    tracing::info!(
        logs = summary.logs,
        frames = summary.frames,
        runner,
        "Stored batch"
    );
    Ok(summary)
}
