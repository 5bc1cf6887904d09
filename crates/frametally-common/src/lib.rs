//! Frametally-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across frametally:
//!
//! - **Typed IDs**: Type-safe UUID wrappers for stored employee and frame rows
//! - **Core Types**: The review-station [`Machine`] tag and the [`LogIdentity`]
//!   carried by every machine log file name
//! - **Path Utilities**: `/`-segment helpers shared by the parsers and the merge engine
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use frametally_common::{LogIdentity, Machine, Error, Result};
//! use frametally_common::paths::strip_segments;
//!
//! let identity: LogIdentity = "Baselight_TDanza_20230326.txt".parse().unwrap();
//! assert_eq!(identity.machine, Machine::Baselight);
//!
//! assert_eq!(strip_segments("/a/b/c/d", 2), "b/c/d");
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_input("log"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
