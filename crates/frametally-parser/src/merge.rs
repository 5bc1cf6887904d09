//! Reconciliation of canonical locations against a parsed machine log.
//!
//! A canonical location matches a log entry when the location, with its
//! first three `/` segments removed, equals the log path exactly. Station
//! paths were already stripped of two segments when the log was parsed;
//! facility paths carry one extra mount segment, hence three here.

use std::fmt;

use frametally_common::paths::{segment, strip_segments, LOCATION_SUFFIX_SKIP};

use crate::dialect::LogDialect;
use crate::ranges::{compress, FrameRange, DEFAULT_STEP};
use crate::{CanonicalRecord, MachineLog};

/// One reconciled output row: a display path and one of its frame ranges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedRecord {
    pub display_path: String,
    pub range: FrameRange,
}

impl fmt::Display for MergedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.display_path, self.range)
    }
}

/// Split a canonical location into its top-level segment and match suffix.
///
/// ```
/// use frametally_parser::merge::location_suffix;
///
/// let (top, suffix) = location_suffix("/hpsans13/production/Dune2/reel1/partA");
/// assert_eq!(top, "hpsans13");
/// assert_eq!(suffix, "Dune2/reel1/partA");
/// ```
pub fn location_suffix(location: &str) -> (&str, String) {
    let top = segment(location, 1).unwrap_or_default();
    (top, strip_segments(location, LOCATION_SUFFIX_SKIP))
}

/// Reconcile every canonical location against `log`.
///
/// Rows come out sorted by the start frame of their range; rows with equal
/// starts keep location order, then log order.
pub fn merge(
    canonical: &CanonicalRecord,
    log: &MachineLog,
    dialect: &dyn LogDialect,
) -> Vec<MergedRecord> {
    let mut records = Vec::new();

    for location in canonical.locations() {
        let (top, suffix) = location_suffix(location);
        if suffix.is_empty() {
            tracing::trace!(location = %location, "Location too short to match");
            continue;
        }

        let matches = dialect.lookup(log, &suffix);
        if matches.is_empty() {
            tracing::debug!(location = %location, machine = %dialect.machine(), "No log entry for location");
            continue;
        }

        for found in matches {
            let display_path = match found.secondary {
                Some(secondary) => format!("{} {}/{}", secondary, top, suffix),
                None => format!("{}/{}", top, suffix),
            };

            let mut frames = found.frames.to_vec();
            frames.sort_unstable();
            frames.dedup();

            records.extend(
                compress(&frames, DEFAULT_STEP)
                    .into_iter()
                    .map(|range| MergedRecord {
                        display_path: display_path.clone(),
                        range,
                    }),
            );
        }
    }

    sort_by_start_frame(&mut records);
    records
}

/// Stable sort by the first frame of each record's range.
pub fn sort_by_start_frame(records: &mut [MergedRecord]) {
    records.sort_by_key(|record| record.range.start());
}
