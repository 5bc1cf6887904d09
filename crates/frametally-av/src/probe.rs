//! ffprobe-based video probing.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use crate::timecode::{seconds_to_timecode, timecode_to_frame, FrameRate};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// What the report pipeline needs to know about a video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub path: PathBuf,
    pub duration: Option<Duration>,
    /// Raw stream frame rate, e.g. `29.97`.
    pub frame_rate: Option<f64>,
}

impl VideoInfo {
    /// Whole-number frame rate, or `fallback` when the probe had none.
    pub fn fps(&self, fallback: FrameRate) -> FrameRate {
        self.frame_rate
            .and_then(FrameRate::from_probed)
            .unwrap_or(fallback)
    }

    /// Index of the last frame, derived by way of the duration timecode.
    ///
    /// Returns `None` when the duration is unknown.
    pub fn last_frame(&self, fps: FrameRate) -> Option<u64> {
        let duration = self.duration?;
        let timecode = seconds_to_timecode(duration.as_secs_f64(), fps);
        timecode_to_frame(&timecode, fps).ok()
    }
}

/// Probe a video with ffprobe.
///
/// `ffprobe` overrides the executable; otherwise it is looked up on `PATH`.
pub fn probe_video(path: &Path, ffprobe: Option<&Path>) -> Result<VideoInfo> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let program = ffprobe.unwrap_or_else(|| Path::new("ffprobe"));
    let output = Command::new(program)
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            "-select_streams",
            "v:0",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::tool_failed("ffprobe", stderr.trim()));
    }

    let json_str = String::from_utf8(output.stdout)
        .map_err(|e| Error::parse_error("ffprobe", format!("invalid UTF-8: {}", e)))?;

    let info = parse_ffprobe_output(path, &json_str)?;
    tracing::debug!(
        path = %path.display(),
        duration = ?info.duration,
        frame_rate = ?info.frame_rate,
        "probed video"
    );
    Ok(info)
}

/// Interpret ffprobe's JSON output.
///
/// The first video stream supplies the frame rate; the container duration
/// is preferred over the stream's.
pub fn parse_ffprobe_output(path: &Path, json: &str) -> Result<VideoInfo> {
    let output: FfprobeOutput = serde_json::from_str(json)?;

    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref().map_or(true, |t| t == "video"));

    let duration = output
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or_else(|| video.and_then(|s| s.duration.as_deref()))
        .and_then(|s| s.parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());

    let frame_rate = video
        .and_then(|s| s.r_frame_rate.as_deref())
        .and_then(parse_frame_rate)
        .filter(|rate| *rate > 0.0);

    Ok(VideoInfo {
        path: path.to_path_buf(),
        duration,
        frame_rate,
    })
}

fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    if let Some((num, den)) = rate_str.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate_str.parse().ok()
}
