//! Single-frame thumbnail extraction with ffmpeg.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use crate::timecode::{FrameRate, Timecode};
use crate::{Error, Result};

/// Output dimensions of a thumbnail, written `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailSize {
    fn default() -> Self {
        Self {
            width: 96,
            height: 74,
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ThumbnailSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("invalid thumbnail size: {}", s));
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// ffmpeg arguments that write `frame` of `input` to `output` as one image.
pub fn thumbnail_args(
    input: &Path,
    frame: u64,
    fps: FrameRate,
    size: ThumbnailSize,
    output: &Path,
) -> Vec<OsString> {
    let seek = Timecode::from_frame(frame, fps).to_seek_position(fps);
    let mut args: Vec<OsString> = ["-y", "-v", "error", "-ss"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(seek.into());
    args.push("-i".into());
    args.push(input.into());
    args.push("-vframes".into());
    args.push("1".into());
    args.push("-s".into());
    args.push(size.to_string().into());
    args.push(output.into());
    args
}

/// Extract one frame of `input` into the image at `output`.
///
/// `ffmpeg` overrides the executable; otherwise it is looked up on `PATH`.
pub fn extract_frame(
    ffmpeg: Option<&Path>,
    input: &Path,
    frame: u64,
    fps: FrameRate,
    size: ThumbnailSize,
    output: &Path,
) -> Result<()> {
    if !input.exists() {
        return Err(Error::file_not_found(input));
    }

    let program = ffmpeg.unwrap_or_else(|| Path::new("ffmpeg"));
    let args = thumbnail_args(input, frame, fps, size, output);
    tracing::debug!(frame, output = %output.display(), "extracting thumbnail");

    let result = Command::new(program).args(&args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found("ffmpeg")
        } else {
            Error::Io(e)
        }
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::tool_failed("ffmpeg", stderr.trim()));
    }

    if !output.exists() {
        return Err(Error::tool_failed(
            "ffmpeg",
            format!("no image written for frame {}", frame),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_size_parse() {
        assert_eq!(
            "96x74".parse::<ThumbnailSize>().unwrap(),
            ThumbnailSize {
                width: 96,
                height: 74
            }
        );
        assert_eq!("320X240".parse::<ThumbnailSize>().unwrap().to_string(), "320x240");
        assert_eq!(ThumbnailSize::default().to_string(), "96x74");
        for bad in ["", "96", "0x74", "96x", "axb", "96x74x2"] {
            assert!(bad.parse::<ThumbnailSize>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_thumbnail_args() {
        let args = thumbnail_args(
            Path::new("in.mp4"),
            90,
            FrameRate::new(60).unwrap(),
            ThumbnailSize::default(),
            Path::new("thumbnails/90.png"),
        );
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-y",
                "-v",
                "error",
                "-ss",
                "00:00:01.500",
                "-i",
                "in.mp4",
                "-vframes",
                "1",
                "-s",
                "96x74",
                "thumbnails/90.png"
            ]
        );
    }

    #[test]
    fn test_extract_frame_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_frame(
            None,
            &dir.path().join("missing.mp4"),
            0,
            FrameRate::default(),
            ThumbnailSize::default(),
            &dir.path().join("0.png"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_extract_frame_tool_missing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.mp4");
        std::fs::write(&input, b"").unwrap();
        let err = extract_frame(
            Some(Path::new("/nonexistent/ffmpeg-12345")),
            &input,
            0,
            FrameRate::default(),
            ThumbnailSize::default(),
            &dir.path().join("0.png"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
