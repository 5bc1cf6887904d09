//! Rust models matching the database schema.

use chrono::{DateTime, NaiveDate, Utc};
use frametally_common::{EmployeeId, FrameEntryId, Machine};
use frametally_parser::FrameRange;
use serde::Serialize;

/// Date format used for `date_of_file` columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One ingested machine log and who submitted it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Employee {
    pub id: EmployeeId,
    /// OS user that ran the ingest.
    pub script_runner: String,
    pub machine: Machine,
    pub user_on_file: String,
    pub date_of_file: NaiveDate,
    pub submitted_at: DateTime<Utc>,
}

/// One merged record: a location and a frame range worked on it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrameEntry {
    pub id: FrameEntryId,
    pub user_on_file: String,
    pub date_of_file: NaiveDate,
    pub location: String,
    #[serde(serialize_with = "serialize_range")]
    pub frame_range: FrameRange,
}

fn serialize_range<S: serde::Serializer>(range: &FrameRange, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(range)
}
