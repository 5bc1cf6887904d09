//! Machine log dialects.
//!
//! Each review station exports a text log with one path per line followed
//! by the frame numbers touched at that path. The two stations disagree on
//! how the path is laid out, so each gets a [`LogDialect`] implementation
//! that knows how to build its keys and how to find them again when
//! reconciling against canonical locations.

mod baselight;
mod flame;

pub use baselight::Baselight;
pub use flame::Flame;

use frametally_common::Machine;

use crate::MachineLog;

/// One log entry matching a canonical location suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMatch<'a> {
    /// Leading field re-emitted before the display path (Flame only).
    pub secondary: Option<&'a str>,
    /// Frames in source order.
    pub frames: &'a [u64],
}

/// A review-station log format.
pub trait LogDialect: Send + Sync {
    /// Station this dialect belongs to.
    fn machine(&self) -> Machine;

    /// Parse one non-blank line into `log`.
    ///
    /// Returns `false` when the line lacks the tokens needed to form a key.
    fn parse_line(&self, line: &str, log: &mut MachineLog) -> bool;

    /// Entries of `log` whose path equals a canonical location `suffix`.
    fn lookup<'a>(&self, log: &'a MachineLog, suffix: &str) -> Vec<LogMatch<'a>>;

    /// Parse a whole log.
    ///
    /// Blank input yields an empty log and a warning; malformed lines are
    /// skipped and counted.
    fn parse(&self, text: &str) -> MachineLog {
        let mut log = MachineLog::new();

        if text.trim().is_empty() {
            tracing::warn!(machine = %self.machine(), "Machine log is empty");
            return log;
        }

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if !self.parse_line(line, &mut log) {
                tracing::trace!(machine = %self.machine(), line_no = line_no + 1, line, "Skipping malformed line");
                log.record_skipped();
            }
        }

        tracing::debug!(
            machine = %self.machine(),
            paths = log.len(),
            skipped = log.skipped_lines(),
            "Parsed machine log"
        );

        log
    }
}

/// Dialect used for logs from `machine`.
pub fn dialect_for(machine: Machine) -> &'static dyn LogDialect {
    match machine {
        Machine::Baselight => &Baselight,
        Machine::Flame => &Flame,
    }
}

/// Parse `text` with the dialect of `machine`.
///
/// ```
/// use frametally_common::Machine;
/// use frametally_parser::parse_log;
///
/// let log = parse_log(Machine::Baselight, "/baselightfilesystem1/Dune2/reel1/partA 5 6 7\n");
/// assert_eq!(log.get("Dune2/reel1/partA"), Some(&[5, 6, 7][..]));
/// ```
pub fn parse_log(machine: Machine, text: &str) -> MachineLog {
    dialect_for(machine).parse(text)
}
