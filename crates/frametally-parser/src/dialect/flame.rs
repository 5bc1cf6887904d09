//! Flame log dialect.
//!
//! ```text
//! /net/flame-archive Dune2/reel1/partA/1920x1080 6 7 8 9 10
//! ```
//!
//! The first token is the storage the Flame worked from, the second the
//! path below it. The key joins the two with a space and drops only the
//! first `/` segment, so the storage label survives as `net/flame-archive`
//! and is re-emitted in front of every reconciled row.

use frametally_common::paths::{strip_segments, FLAME_KEY_SKIP};
use frametally_common::Machine;

use super::{LogDialect, LogMatch};
use crate::ranges::parse_frame;
use crate::MachineLog;

/// Flame finishing station logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flame;

impl LogDialect for Flame {
    fn machine(&self) -> Machine {
        Machine::Flame
    }

    fn parse_line(&self, line: &str, log: &mut MachineLog) -> bool {
        let mut tokens = line.split_whitespace();
        let (Some(secondary), Some(path)) = (tokens.next(), tokens.next()) else {
            return false;
        };

        let key = strip_segments(&format!("{} {}", secondary, path), FLAME_KEY_SKIP);
        if key.is_empty() {
            return false;
        }

        log.entry(key).extend(tokens.filter_map(parse_frame));
        true
    }

    fn lookup<'a>(&self, log: &'a MachineLog, suffix: &str) -> Vec<LogMatch<'a>> {
        log.iter()
            .filter_map(|(key, frames)| {
                let (secondary, path) = key.split_once(' ')?;
                (path == suffix).then_some(LogMatch {
                    secondary: Some(secondary),
                    frames,
                })
            })
            .collect()
    }
}
