//! # frametally-av
//!
//! Video side of the frame report: timecode arithmetic, ffprobe probing
//! and ffmpeg thumbnail extraction.
//!
//! Timecode conversions are pure. Probing and thumbnailing shell out to
//! `ffprobe` and `ffmpeg`, which must be installed or configured.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use frametally_av::{probe_video, FrameRate};
//!
//! let info = probe_video(Path::new("/path/to/review.mp4"), None)?;
//! let fps = info.fps(FrameRate::default());
//! println!("last frame: {:?}", info.last_frame(fps));
//! # Ok::<(), frametally_av::Error>(())
//! ```

mod error;
pub mod probe;
pub mod thumbnail;
pub mod timecode;
pub mod tools;

pub use error::{Error, Result};
pub use probe::{probe_video, VideoInfo};
pub use thumbnail::{extract_frame, ThumbnailSize};
pub use timecode::{
    frame_to_timecode, middle_frame_of_range, range_to_timecodes, seconds_to_timecode,
    timecode_to_frame, FrameRate, Timecode, DEFAULT_FPS,
};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
