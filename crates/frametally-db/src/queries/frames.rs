//! Frame entry queries.
//!
//! Each stored row is one merged record from one machine log. The report
//! queries filter these rows by user, by date, by location text, or by
//! the machine recorded on the matching employee row.

use chrono::NaiveDate;
use frametally_common::{FrameEntryId, Machine, Result};
use frametally_parser::MergedRecord;
use rusqlite::{Connection, Row};

use super::{conversion_err, db_err, format_date, parse_date};
use crate::models::FrameEntry;

const FRAME_COLUMNS: &str = "f.id, f.user_on_file, f.date_of_file, f.location, f.frame_range";

fn frame_from_row(row: &Row<'_>) -> rusqlite::Result<FrameEntry> {
    let id: String = row.get(0)?;
    let range: String = row.get(4)?;
    Ok(FrameEntry {
        id: id.parse().map_err(|e| conversion_err(0, e))?,
        user_on_file: row.get(1)?,
        date_of_file: parse_date(2, &row.get::<_, String>(2)?)?,
        location: row.get(3)?,
        frame_range: range.parse().map_err(|e| conversion_err(4, e))?,
    })
}

fn query_frames(
    conn: &Connection,
    sql: &str,
    params: &[(&str, &dyn rusqlite::ToSql)],
) -> Result<Vec<FrameEntry>> {
    let mut stmt = conn.prepare(sql).map_err(db_err)?;
    let rows = stmt.query_map(params, frame_from_row).map_err(db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
}

/// Store the merged records of one log in a single transaction.
///
/// Returns the number of rows written.
pub fn insert_frames(
    conn: &Connection,
    user_on_file: &str,
    date_of_file: NaiveDate,
    records: &[MergedRecord],
) -> Result<usize> {
    let tx = conn.unchecked_transaction().map_err(db_err)?;
    let date = format_date(date_of_file);

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO frames (id, user_on_file, date_of_file, location, frame_range)
                 VALUES (:id, :user_on_file, :date_of_file, :location, :frame_range)",
            )
            .map_err(db_err)?;

        for record in records {
            stmt.execute(rusqlite::named_params! {
                ":id": FrameEntryId::new().to_string(),
                ":user_on_file": user_on_file,
                ":date_of_file": date,
                ":location": record.display_path,
                ":frame_range": record.range.to_string(),
            })
            .map_err(db_err)?;
        }
    }

    tx.commit().map_err(db_err)?;
    Ok(records.len())
}

/// Every row recorded for `user`.
pub fn work_by_user(conn: &Connection, user: &str) -> Result<Vec<FrameEntry>> {
    query_frames(
        conn,
        &format!(
            "SELECT {FRAME_COLUMNS} FROM frames f
             WHERE f.user_on_file = :user ORDER BY f.date_of_file, f.rowid"
        ),
        rusqlite::named_params! { ":user": user },
    )
}

/// Rows dated strictly before `date` whose log came from `machine`.
pub fn work_before_date_on_machine(
    conn: &Connection,
    date: NaiveDate,
    machine: Machine,
) -> Result<Vec<FrameEntry>> {
    query_frames(
        conn,
        &format!(
            "SELECT {FRAME_COLUMNS} FROM frames f
             WHERE f.date_of_file < :date
               AND EXISTS (
                   SELECT 1 FROM employees e
                   WHERE e.user_on_file = f.user_on_file
                     AND e.date_of_file = f.date_of_file
                     AND e.machine = :machine
               )
             ORDER BY f.date_of_file, f.rowid"
        ),
        rusqlite::named_params! {
            ":date": format_date(date),
            ":machine": machine.as_str(),
        },
    )
}

/// Rows dated `date` whose location contains `needle`.
pub fn work_at_location_on_date(
    conn: &Connection,
    needle: &str,
    date: NaiveDate,
) -> Result<Vec<FrameEntry>> {
    // instr() keeps '%' and '_' in the needle literal.
    query_frames(
        conn,
        &format!(
            "SELECT {FRAME_COLUMNS} FROM frames f
             WHERE instr(f.location, :needle) > 0 AND f.date_of_file = :date
             ORDER BY f.rowid"
        ),
        rusqlite::named_params! {
            ":needle": needle,
            ":date": format_date(date),
        },
    )
}

/// Multi-frame rows whose range ends at or before `max_frame`.
///
/// Single-frame rows have no span to thumbnail and are skipped.
pub fn ranges_within(conn: &Connection, max_frame: u64) -> Result<Vec<FrameEntry>> {
    let rows = query_frames(
        conn,
        &format!(
            "SELECT {FRAME_COLUMNS} FROM frames f
             WHERE instr(f.frame_range, '-') > 0 ORDER BY f.rowid"
        ),
        &[],
    )?;

    Ok(rows
        .into_iter()
        .filter(|row| !row.frame_range.is_single() && row.frame_range.end() <= max_frame)
        .collect())
}

/// Total number of stored frame rows.
pub fn count_frames(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM frames", [], |row| row.get::<_, i64>(0))
        .map(|n| n.max(0) as u64)
        .map_err(db_err)
}
