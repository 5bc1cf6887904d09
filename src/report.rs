//! Canned queries over stored logs.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::NaiveDate;
use frametally_common::Machine;
use frametally_db::models::{Employee, FrameEntry};
use frametally_db::queries::{employees, frames};
use rusqlite::Connection;
use serde::Serialize;

/// Which report to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportQuery {
    /// All work recorded for a user.
    User(String),
    /// Work dated before a day on one machine.
    Before { date: NaiveDate, machine: Machine },
    /// Work on a location containing some text, on one day.
    Location { needle: String, date: NaiveDate },
    /// Everyone who submitted a log from a machine.
    Users(Machine),
    /// Every ingested log.
    Logs,
}

/// Result rows of a [`ReportQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Frames(Vec<FrameEntry>),
    Users(Vec<String>),
    Logs {
        logs: Vec<Employee>,
        frame_ranges: u64,
    },
}

impl Report {
    pub fn len(&self) -> usize {
        match self {
            Self::Frames(rows) => rows.len(),
            Self::Users(users) => users.len(),
            Self::Logs { logs, .. } => logs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn run_report(conn: &Connection, query: &ReportQuery) -> Result<Report> {
    let report = match query {
        ReportQuery::User(user) => Report::Frames(frames::work_by_user(conn, user)?),
        ReportQuery::Before { date, machine } => {
            Report::Frames(frames::work_before_date_on_machine(conn, *date, *machine)?)
        }
        ReportQuery::Location { needle, date } => {
            Report::Frames(frames::work_at_location_on_date(conn, needle, *date)?)
        }
        ReportQuery::Users(machine) => Report::Users(employees::users_by_machine(conn, *machine)?),
        ReportQuery::Logs => Report::Logs {
            logs: employees::list_employees(conn)?,
            frame_ranges: frames::count_frames(conn)?,
        },
    };

    tracing::debug!(?query, rows = report.len(), "Ran report");
    Ok(report)
}

/// Human-readable rendering, one blank-line-separated block per row.
pub fn render_text(query: &ReportQuery, report: &Report) -> String {
    let mut out = String::new();

    match report {
        Report::Users(users) => {
            for user in users {
                let _ = writeln!(out, "{}", user);
            }
        }
        Report::Frames(rows) => {
            for row in rows {
                if let ReportQuery::Before { machine, .. } = query {
                    let _ = writeln!(out, "machine: {}", machine);
                }
                let _ = writeln!(out, "user_on_file: {}", row.user_on_file);
                let _ = writeln!(out, "date_of_file: {}", row.date_of_file.format("%m/%d/%Y"));
                let _ = writeln!(out, "location: {}", row.location);
                let _ = writeln!(out, "frame_range: {}", row.frame_range);
                out.push('\n');
            }
        }
        Report::Logs { logs, frame_ranges } => {
            for log in logs {
                let _ = writeln!(out, "machine: {}", log.machine);
                let _ = writeln!(out, "user_on_file: {}", log.user_on_file);
                let _ = writeln!(out, "date_of_file: {}", log.date_of_file.format("%m/%d/%Y"));
                let _ = writeln!(out, "script_runner: {}", log.script_runner);
                out.push('\n');
            }
            let _ = writeln!(out, "{} logs, {} frame ranges", logs.len(), frame_ranges);
        }
    }

    out
}
