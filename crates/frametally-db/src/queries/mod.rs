//! Database query modules.
//!
//! - employees: one row per ingested log, and who ran the ingest
//! - frames: merged records and the report queries over them

pub mod employees;
pub mod frames;

use chrono::NaiveDate;
use frametally_common::{Error, Machine};

use crate::models::DATE_FORMAT;

pub(crate) fn db_err(e: rusqlite::Error) -> Error {
    Error::database(e.to_string())
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Column conversion failure for values that do not parse back.
pub(crate) fn conversion_err(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn parse_date(column: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| conversion_err(column, e))
}

pub(crate) fn parse_machine(column: usize, value: &str) -> rusqlite::Result<Machine> {
    value.parse().map_err(|e: Error| conversion_err(column, e))
}
