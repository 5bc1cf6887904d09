//! Core type definitions for review stations and their log files.
//!
//! Every machine log arrives with a file name of the form
//! `{Machine}_{User}_{YYYYMMDD}.{ext}`. The machine tag selects the log
//! dialect; the user and date travel with the reconciled rows into storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Review station that produced a machine log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Machine {
    /// Baselight grading station.
    Baselight,
    /// Flame finishing station.
    Flame,
}

impl Machine {
    /// All supported machines.
    pub const ALL: [Machine; 2] = [Machine::Baselight, Machine::Flame];

    /// Name as it appears in log file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baselight => "Baselight",
            Self::Flame => "Flame",
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Machine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baselight" => Ok(Self::Baselight),
            "flame" => Ok(Self::Flame),
            _ => Err(Error::invalid_input(format!("unsupported machine: {}", s))),
        }
    }
}

/// Identity of one machine log, derived from its file name.
///
/// # Examples
///
/// ```
/// use frametally_common::{LogIdentity, Machine};
///
/// let id: LogIdentity = "Flame_DFlowers_20230323.txt".parse().unwrap();
/// assert_eq!(id.machine, Machine::Flame);
/// assert_eq!(id.user, "DFlowers");
/// assert_eq!(id.key(), "Flame_DFlowers_20230323");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogIdentity {
    pub machine: Machine,
    pub user: String,
    pub date: NaiveDate,
}

impl LogIdentity {
    /// Composite run key `{machine}_{user}_{YYYYMMDD}`.
    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.machine, self.user, self.date_token())
    }

    /// Date in the compact `YYYYMMDD` form used in file names.
    pub fn date_token(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

impl fmt::Display for LogIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for LogIdentity {
    type Err = Error;

    /// Parse a bare file name such as `Baselight_TDanza_20230326.txt`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = name.split('_').collect();
        let [machine, user, date] = parts.as_slice() else {
            return Err(Error::invalid_input(format!(
                "expected {{Machine}}_{{User}}_{{YYYYMMDD}}, got: {}",
                name
            )));
        };

        let machine: Machine = machine.parse()?;
        if user.is_empty() {
            return Err(Error::invalid_input(format!("missing user in: {}", name)));
        }

        let date_token = date.split('.').next().unwrap_or_default();
        let date = NaiveDate::parse_from_str(date_token, "%Y%m%d")
            .map_err(|e| Error::invalid_input(format!("bad date '{}': {}", date_token, e)))?;

        Ok(Self {
            machine,
            user: user.to_string(),
            date,
        })
    }
}
