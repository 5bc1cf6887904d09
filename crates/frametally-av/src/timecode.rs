//! Frame, seconds and timecode arithmetic.
//!
//! All conversions are parameterized by a whole-number [`FrameRate`].
//! Timecodes are non-drop-frame `HH:MM:SS:FF`.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use frametally_parser::FrameRange;

use crate::{Error, Result};

/// Frame rate assumed when a video cannot be probed.
pub const DEFAULT_FPS: u32 = 60;

/// Whole frames per second, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate(NonZeroU32);

impl FrameRate {
    /// Returns `None` for zero.
    pub fn new(fps: u32) -> Option<Self> {
        NonZeroU32::new(fps).map(Self)
    }

    /// Round a probed rate such as `29.97` to whole frames.
    pub fn from_probed(rate: f64) -> Option<Self> {
        if !rate.is_finite() || rate < 0.5 {
            return None;
        }
        Self::new(rate.round() as u32)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }

    fn as_u64(&self) -> u64 {
        u64::from(self.0.get())
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(NonZeroU32::MIN.saturating_add(DEFAULT_FPS - 1))
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}fps", self.0)
    }
}

/// A non-drop-frame timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
}

impl Timecode {
    /// Timecode of a zero-based frame index.
    pub fn from_frame(frame: u64, fps: FrameRate) -> Self {
        let fps = fps.as_u64();
        let total_seconds = frame / fps;
        Self {
            hours: total_seconds / 3600,
            minutes: total_seconds / 60 % 60,
            seconds: total_seconds % 60,
            frames: frame % fps,
        }
    }

    /// Timecode of a duration in seconds, truncating to whole frames.
    ///
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_seconds(seconds: f64, fps: FrameRate) -> Self {
        let seconds = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        let whole = seconds.trunc() as u64;
        let frames = (seconds.fract() * f64::from(fps.get())) as u64;

        Self {
            hours: whole / 3600,
            minutes: whole / 60 % 60,
            seconds: whole % 60,
            frames: frames.min(fps.as_u64() - 1),
        }
    }

    /// Zero-based frame index of this timecode, saturating at `u64::MAX`.
    pub fn to_frame(&self, fps: FrameRate) -> u64 {
        let fps = fps.as_u64();
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
            .saturating_mul(fps)
            .saturating_add(self.frames)
    }

    /// Seek position for ffmpeg's `-ss`, with frames rendered as milliseconds.
    pub fn to_seek_position(&self, fps: FrameRate) -> String {
        let millis = self.frames * 1000 / fps.as_u64();
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, millis
        )
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

impl FromStr for Timecode {
    type Err = Error;

    /// Parse `HH:MM:SS:FF`; the frame field may also follow a `.`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("invalid timecode: {}", s));

        let (clock, frames) = s.trim().rsplit_once([':', '.']).ok_or_else(invalid)?;
        let fields: Vec<u64> = clock
            .split(':')
            .chain(std::iter::once(frames))
            .map(|field| {
                if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                field.parse().ok()
            })
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        let [hours, minutes, seconds, frames] = fields.as_slice() else {
            return Err(invalid());
        };

        Ok(Self {
            hours: *hours,
            minutes: *minutes,
            seconds: *seconds,
            frames: *frames,
        })
    }
}

/// Render a frame index as `HH:MM:SS.FF`.
///
/// The second field is `frame / fps / 60 mod 60` and the third
/// `frame / fps mod 60`; frames follow a `.` rather than a `:`. Downstream
/// reports depend on this exact layout.
///
/// ```
/// use frametally_av::timecode::{frame_to_timecode, FrameRate};
///
/// let fps = FrameRate::new(60).unwrap();
/// assert_eq!(frame_to_timecode(5430, fps), "00:01:30.30");
/// ```
pub fn frame_to_timecode(frame: u64, fps: FrameRate) -> String {
    let per_second = fps.as_u64();
    let hours = frame / per_second / 60 / 60;
    let second_field = frame / per_second / 60 % 60;
    let third_field = frame / per_second % 60;
    let frames = frame % per_second;
    format!(
        "{:02}:{:02}:{:02}.{:02}",
        hours, second_field, third_field, frames
    )
}

/// Frame index of an `HH:MM:SS:FF` (or `HH:MM:SS.FF`) timecode.
///
/// ```
/// use frametally_av::timecode::{timecode_to_frame, FrameRate};
///
/// let fps = FrameRate::new(60).unwrap();
/// assert_eq!(timecode_to_frame("00:01:30:30", fps).unwrap(), 5430);
/// ```
pub fn timecode_to_frame(timecode: &str, fps: FrameRate) -> Result<u64> {
    Ok(timecode.parse::<Timecode>()?.to_frame(fps))
}

/// Render a duration in seconds as `HH:MM:SS:FF`.
///
/// ```
/// use frametally_av::timecode::{seconds_to_timecode, FrameRate};
///
/// let fps = FrameRate::new(60).unwrap();
/// assert_eq!(seconds_to_timecode(90.5, fps), "00:01:30:30");
/// ```
pub fn seconds_to_timecode(seconds: f64, fps: FrameRate) -> String {
    Timecode::from_seconds(seconds, fps).to_string()
}

/// Middle frame of a `"a-b"` range string, rounded toward `a`.
///
/// ```
/// use frametally_av::timecode::middle_frame_of_range;
///
/// assert_eq!(middle_frame_of_range("31-34").unwrap(), 32);
/// assert_eq!(middle_frame_of_range("7").unwrap(), 7);
/// ```
pub fn middle_frame_of_range(range: &str) -> Result<u64> {
    Ok(range.parse::<FrameRange>()?.middle_frame())
}

/// Start and end timecodes of a range, joined as `start-end`.
pub fn range_to_timecodes(range: FrameRange, fps: FrameRate) -> String {
    format!(
        "{}-{}",
        frame_to_timecode(range.start(), fps),
        frame_to_timecode(range.end(), fps)
    )
}
