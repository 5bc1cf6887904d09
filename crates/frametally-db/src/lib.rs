//! frametally-db: SQLite persistence for reconciled frame logs.
//!
//! Uses rusqlite with r2d2 connection pooling. Two tables: `employees`
//! (one row per ingested log) and `frames` (one row per merged record).
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use frametally_common::Machine;
//! use frametally_db::pool::{get_conn, init_pool};
//! use frametally_db::queries::employees;
//!
//! let pool = init_pool("frametally.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2023, 3, 26).unwrap();
//! employees::insert_employee(&conn, "ops", Machine::Baselight, "TDanza", date).unwrap();
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
