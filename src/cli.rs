use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use frametally_common::Machine;

#[derive(Parser)]
#[command(name = "frametally")]
#[command(author, version, about = "Reconcile review-station frame logs against work orders")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile logs and write output_{date}.csv
    Csv {
        /// Facility work order listing canonical locations
        #[arg(long, required = true)]
        xytech: PathBuf,

        /// Machine logs named {Machine}_{User}_{YYYYMMDD}.txt
        #[arg(long, required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Directory for the CSV (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Reconcile logs and store the results in the database
    Db {
        /// Facility work order listing canonical locations
        #[arg(long, required = true)]
        xytech: PathBuf,

        /// Machine logs named {Machine}_{User}_{YYYYMMDD}.txt
        #[arg(long, required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Query stored work
    Report {
        /// Output as JSON
        #[arg(long, global = true)]
        json: bool,

        #[command(subcommand)]
        query: ReportCommand,
    },

    /// Build video-information.xlsx with thumbnails for stored ranges inside a video
    Process {
        /// Video to probe
        #[arg(required = true)]
        video: PathBuf,

        /// Directory for the report (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// All work recorded for a user
    User {
        user: String,
    },

    /// Work dated before a day on one machine
    Before {
        /// Day as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        #[arg(value_parser = parse_machine)]
        machine: Machine,
    },

    /// Work on locations containing TEXT on one day
    Location {
        text: String,

        /// Day as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Everyone who submitted a log from a machine
    Users {
        #[arg(value_parser = parse_machine)]
        machine: Machine,
    },

    /// Every ingested log and the number of stored frame ranges
    Logs,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_machine(s: &str) -> Result<Machine, String> {
    s.parse().map_err(|e: frametally_common::Error| e.to_string())
}
