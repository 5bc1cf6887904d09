//! Baselight log dialect.
//!
//! ```text
//! /baselightfilesystem1/Dune2/reel1/partA/1920x1080 2 3 4 31 32 33 <err> 67
//! ```
//!
//! The key is the path with its first two `/` segments dropped.

use frametally_common::paths::{strip_segments, BASELIGHT_KEY_SKIP};
use frametally_common::Machine;

use super::{LogDialect, LogMatch};
use crate::ranges::parse_frame;
use crate::MachineLog;

/// Baselight grading station logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Baselight;

impl LogDialect for Baselight {
    fn machine(&self) -> Machine {
        Machine::Baselight
    }

    fn parse_line(&self, line: &str, log: &mut MachineLog) -> bool {
        let mut tokens = line.split_whitespace();
        let Some(path) = tokens.next() else {
            return false;
        };

        let key = strip_segments(path, BASELIGHT_KEY_SKIP);
        if key.is_empty() {
            return false;
        }

        log.entry(key).extend(tokens.filter_map(parse_frame));
        true
    }

    fn lookup<'a>(&self, log: &'a MachineLog, suffix: &str) -> Vec<LogMatch<'a>> {
        log.get(suffix)
            .map(|frames| LogMatch {
                secondary: None,
                frames,
            })
            .into_iter()
            .collect()
    }
}
