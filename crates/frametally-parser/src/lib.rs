//! # frametally-parser
//!
//! Parsing and reconciliation engine for review-station frame logs.
//!
//! A facility work order lists canonical locations; review stations
//! (Baselight, Flame) export logs of the frames touched at each path.
//! This crate parses both, matches log paths to locations by path suffix,
//! and compresses the touched frames into contiguous ranges.
//!
//! The crate is pure: it takes text and returns values. Reading files,
//! writing CSV and storing rows belong to the callers.
//!
//! ## Quick Start
//!
//! ```
//! use frametally_common::Machine;
//! use frametally_parser::reconcile;
//!
//! let work_order = "Location:\n/hpsans13/production/Dune2/reel1/partA/1920x1080\n";
//! let log = "/baselightfilesystem1/Dune2/reel1/partA/1920x1080 1 2 3 7\n";
//!
//! let rows: Vec<String> = reconcile(work_order, Machine::Baselight, log)
//!     .unwrap()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! assert_eq!(
//!     rows,
//!     [
//!         "hpsans13/Dune2/reel1/partA/1920x1080,1-3",
//!         "hpsans13/Dune2/reel1/partA/1920x1080,7",
//!     ]
//! );
//! ```

pub mod dialect;
mod error;
pub mod location;
mod log;
pub mod merge;
pub mod ranges;

pub use dialect::{dialect_for, parse_log, Baselight, Flame, LogDialect, LogMatch};
pub use error::ParseError;
pub use location::{parse_locations, AttributeValue, CanonicalRecord};
pub use log::MachineLog;
pub use merge::{merge, MergedRecord};
pub use ranges::{compress, FrameRange, DEFAULT_STEP};

use frametally_common::Machine;

/// Parse a work order and one machine log, then reconcile them.
///
/// Fails only when the work order text is blank; an empty machine log
/// yields no rows.
pub fn reconcile(
    canonical_text: &str,
    machine: Machine,
    log_text: &str,
) -> Result<Vec<MergedRecord>, ParseError> {
    let canonical = parse_locations(canonical_text)?;
    let dialect = dialect_for(machine);
    let log = dialect.parse(log_text);
    Ok(merge(&canonical, &log, dialect))
}
