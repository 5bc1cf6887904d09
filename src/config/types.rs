use std::path::PathBuf;

use anyhow::{Context, Result};
use frametally_av::{FrameRate, ThumbnailSize, DEFAULT_FPS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub video: VideoConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file holding ingested logs
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("frametally.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for CSV and workbook reports
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoConfig {
    /// Frame rate used when ffprobe reports none
    #[serde(default = "default_fps")]
    pub default_fps: u32,

    /// Thumbnail dimensions as `WxH`
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: String,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

fn default_thumbnail_size() -> String {
    ThumbnailSize::default().to_string()
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            default_fps: default_fps(),
            thumbnail_size: default_thumbnail_size(),
        }
    }
}

impl VideoConfig {
    pub fn frame_rate(&self) -> Result<FrameRate> {
        FrameRate::new(self.default_fps)
            .with_context(|| format!("video.default_fps must be positive, got {}", self.default_fps))
    }

    pub fn thumbnail_size(&self) -> Result<ThumbnailSize> {
        self.thumbnail_size
            .parse()
            .with_context(|| format!("video.thumbnail_size {:?} is not WxH", self.thumbnail_size))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}
