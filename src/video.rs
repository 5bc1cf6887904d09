//! Video report: stored ranges that fall inside a video, with thumbnails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frametally_av::{
    extract_frame, frame_to_timecode, get_tool_path, probe_video, range_to_timecodes, FrameRate,
    ThumbnailSize,
};
use frametally_db::models::FrameEntry;
use frametally_db::queries::frames;
use rusqlite::Connection;

use crate::output::{write_video_report, VideoRow};

/// Prefix of the scratch directory thumbnails are extracted into.
pub const THUMBNAIL_DIR_PREFIX: &str = "thumbnails";

#[derive(Debug, Clone)]
pub struct VideoOptions {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    /// Used when the probe reports no frame rate.
    pub default_fps: FrameRate,
    pub thumbnail_size: ThumbnailSize,
    pub out_dir: PathBuf,
}

/// A stored range placed on the video's timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub entry: FrameEntry,
    pub middle_frame: u64,
    pub timecode_range: String,
    pub middle_timecode: String,
}

impl Shot {
    pub fn new(entry: FrameEntry, fps: FrameRate) -> Self {
        let middle_frame = entry.frame_range.middle_frame();
        Self {
            timecode_range: range_to_timecodes(entry.frame_range, fps),
            middle_timecode: frame_to_timecode(middle_frame, fps),
            middle_frame,
            entry,
        }
    }

    pub fn thumbnail_name(&self) -> String {
        format!("{}.png", self.middle_frame)
    }
}

/// Turn shots into report rows, extracting one thumbnail per shot into
/// `thumbnail_dir`.
///
/// A failed extraction is logged and leaves the thumbnail cell empty.
pub fn build_rows<F>(shots: &[Shot], thumbnail_dir: &Path, mut extract: F) -> Vec<VideoRow>
where
    F: FnMut(u64, &Path) -> Result<()>,
{
    shots
        .iter()
        .map(|shot| {
            let image = thumbnail_dir.join(shot.thumbnail_name());
            let thumbnail = match extract(shot.middle_frame, &image) {
                Ok(()) => Some(image),
                Err(e) => {
                    tracing::warn!(
                        frame = shot.middle_frame,
                        timecode = %shot.middle_timecode,
                        "Thumbnail extraction failed: {:#}",
                        e
                    );
                    None
                }
            };

            VideoRow {
                location: shot.entry.location.clone(),
                frame_range: shot.entry.frame_range.to_string(),
                timecode_range: shot.timecode_range.clone(),
                thumbnail,
            }
        })
        .collect()
}

/// Probe `video`, select stored ranges that fit inside it and write
/// `video-information.xlsx` with embedded thumbnails. Returns the report path.
pub fn process_video(conn: &Connection, video: &Path, opts: &VideoOptions) -> Result<PathBuf> {
    if !video.exists() {
        return Err(frametally_av::Error::file_not_found(video).into());
    }

    let ffprobe = get_tool_path("ffprobe", opts.ffprobe.as_deref())?;
    let ffmpeg = get_tool_path("ffmpeg", opts.ffmpeg.as_deref())?;

    let info = probe_video(video, Some(ffprobe.as_path()))
        .with_context(|| format!("Failed to probe {:?}", video))?;

    let fps = info.fps(opts.default_fps);
    let last_frame = info
        .last_frame(fps)
        .with_context(|| format!("ffprobe reported no duration for {:?}", video))?;
    tracing::info!(%fps, last_frame, "Probed video");

    let shots: Vec<Shot> = frames::ranges_within(conn, last_frame)?
        .into_iter()
        .map(|entry| Shot::new(entry, fps))
        .collect();
    tracing::info!("{} stored ranges fall within the video", shots.len());

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", opts.out_dir))?;
    // Removed on drop, after the workbook has read the images.
    let thumbnail_dir = tempfile::Builder::new()
        .prefix(THUMBNAIL_DIR_PREFIX)
        .tempdir_in(&opts.out_dir)
        .context("Failed to create thumbnail directory")?;

    let rows = build_rows(&shots, thumbnail_dir.path(), |frame, output| {
        extract_frame(
            Some(ffmpeg.as_path()),
            video,
            frame,
            fps,
            opts.thumbnail_size,
            output,
        )
        .map_err(Into::into)
    });

    write_video_report(&rows, &opts.out_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use frametally_common::FrameEntryId;

    fn entry(location: &str, range: &str) -> FrameEntry {
        FrameEntry {
            id: FrameEntryId::new(),
            user_on_file: "TDanza".into(),
            date_of_file: NaiveDate::from_ymd_opt(2023, 3, 26).unwrap(),
            location: location.into(),
            frame_range: range.parse().unwrap(),
        }
    }

    #[test]
    fn test_shot_timecodes() {
        let shot = Shot::new(entry("loc", "60-121"), FrameRate::new(60).unwrap());
        assert_eq!(shot.middle_frame, 90);
        assert_eq!(shot.middle_timecode, "00:00:01.30");
        assert_eq!(shot.timecode_range, "00:00:01.00-00:00:02.01");
        assert_eq!(shot.thumbnail_name(), "90.png");
    }

    #[test]
    fn test_build_rows_tolerates_failed_extraction() {
        let fps = FrameRate::new(24).unwrap();
        let shots = vec![
            Shot::new(entry("a", "10-20"), fps),
            Shot::new(entry("b", "30-40"), fps),
        ];

        let mut requested = Vec::new();
        let rows = build_rows(&shots, Path::new("/scratch"), |frame, path| {
            requested.push((frame, path.to_path_buf()));
            if frame == 35 {
                anyhow::bail!("decoder error");
            }
            Ok(())
        });

        assert_eq!(
            requested,
            [
                (15, PathBuf::from("/scratch/15.png")),
                (35, PathBuf::from("/scratch/35.png")),
            ]
        );
        assert_eq!(rows[0].thumbnail, Some(PathBuf::from("/scratch/15.png")));
        assert_eq!(rows[0].frame_range, "10-20");
        assert_eq!(rows[1].location, "b");
        assert!(rows[1].thumbnail.is_none());
    }

    #[test]
    fn test_process_video_missing_file() {
        let pool = frametally_db::pool::init_memory_pool().unwrap();
        let conn = frametally_db::pool::get_conn(&pool).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let opts = VideoOptions {
            ffmpeg: None,
            ffprobe: None,
            default_fps: FrameRate::default(),
            thumbnail_size: ThumbnailSize::default(),
            out_dir: dir.path().to_path_buf(),
        };

        let err = process_video(&conn, &dir.path().join("missing.mp4"), &opts).unwrap_err();
        assert!(format!("{:#}", err).contains("file not found"));
    }
}
