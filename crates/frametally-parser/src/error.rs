//! Parser error type.

/// Errors surfaced by the parsers.
///
/// Malformed lines and non-numeric tokens are never surfaced; they are
/// skipped and counted on the resulting [`MachineLog`](crate::MachineLog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Blank or whitespace-only text was handed to a parser.
    #[error("empty input: no {0} to parse")]
    EmptyInput(&'static str),

    /// A frame range string was not `n` or `a-b` with `a <= b`.
    #[error("invalid frame range: {0}")]
    InvalidRange(String),
}
