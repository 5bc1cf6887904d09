//! Frame-range compression.
//!
//! Turns an ascending frame list into maximal runs, rendered as `"n"` for a
//! single frame and `"a-b"` for a run.

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Step between consecutive frames of a run.
pub const DEFAULT_STEP: u64 = 1;

/// A closed interval of frame numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRange {
    start: u64,
    end: u64,
}

impl FrameRange {
    /// Create a range, returning `None` when `start > end`.
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A range covering one frame.
    pub fn single(frame: u64) -> Self {
        Self {
            start: frame,
            end: frame,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Whether the range covers exactly one frame.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Number of frames covered at step 1.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Never true; a range always covers at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Frame halfway through the range, rounded toward the start.
    ///
    /// ```
    /// use frametally_parser::FrameRange;
    ///
    /// let range: FrameRange = "10-15".parse().unwrap();
    /// assert_eq!(range.middle_frame(), 12);
    /// ```
    pub fn middle_frame(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }

    /// Expand back into individual frames spaced by `step`.
    pub fn expand(&self, step: u64) -> impl Iterator<Item = u64> {
        let step = usize::try_from(step.max(1)).unwrap_or(usize::MAX);
        (self.start..=self.end).step_by(step)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for FrameRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidRange(s.to_string());
        let s = s.trim();

        match s.split_once('-') {
            Some((start, end)) => {
                let start = parse_frame(start).ok_or_else(invalid)?;
                let end = parse_frame(end).ok_or_else(invalid)?;
                Self::new(start, end).ok_or_else(invalid)
            }
            None => parse_frame(s).map(Self::single).ok_or_else(invalid),
        }
    }
}

/// Parse a token as a non-negative frame number.
///
/// Only plain ASCII digits are accepted; signs, whitespace, decimals and
/// tokens such as `<err>` or `<null>` yield `None`.
pub fn parse_frame(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Compress frames into maximal runs where each element is exactly `step`
/// greater than the previous one.
///
/// The input is not sorted here; callers pass ascending frames.
///
/// ```
/// use frametally_parser::{compress, DEFAULT_STEP};
///
/// let ranges: Vec<String> = compress(&[1, 2, 3, 7, 9, 10], DEFAULT_STEP)
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(ranges, ["1-3", "7", "9-10"]);
/// ```
pub fn compress(frames: &[u64], step: u64) -> Vec<FrameRange> {
    let Some((&first, rest)) = frames.split_first() else {
        tracing::debug!("No frames to compress");
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut previous = first;

    for &frame in rest {
        if previous.checked_add(step) == Some(frame) {
            previous = frame;
        } else {
            ranges.push(FrameRange {
                start,
                end: previous,
            });
            start = frame;
            previous = frame;
        }
    }
    ranges.push(FrameRange {
        start,
        end: previous,
    });

    ranges
}
