//! Frametally: reconcile review-station frame logs against work orders.
//!
//! This library crate exposes the command implementations for integration
//! testing; the parsing and matching engine lives in `frametally-parser`.

pub mod config;
pub mod ingest;
pub mod output;
pub mod report;
pub mod store;
pub mod video;
