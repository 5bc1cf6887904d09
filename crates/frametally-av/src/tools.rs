//! External tool detection.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Tools the video report shells out to.
pub const REQUIRED_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of the tool's version output.
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Check whether `program` runs with `-version`, reporting it as `name`.
///
/// ```no_run
/// use frametally_av::check_tool;
///
/// let info = check_tool("ffprobe", None);
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str, configured: Option<&Path>) -> ToolInfo {
    let program = configured.unwrap_or_else(|| Path::new(name));
    let result = Command::new(program).arg("-version").output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = match configured {
                Some(path) => Some(path.to_path_buf()),
                None => which::which(name).ok(),
            };

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check ffmpeg and ffprobe, honouring configured paths.
pub fn check_tools(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> Vec<ToolInfo> {
    REQUIRED_TOOLS
        .into_iter()
        .zip([ffmpeg, ffprobe])
        .map(|(name, configured)| check_tool(name, configured))
        .collect()
}

/// Require that a tool is on `PATH`, returning its path.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Path to a tool, preferring an existing configured path over `PATH` lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(
            tool = name,
            path = %path.display(),
            "configured tool path does not exist, falling back to PATH"
        );
    }

    require_tool(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool("nonexistent_tool_12345", None);
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_check_tool_bad_configured_path() {
        let info = check_tool("ffmpeg", Some(Path::new("/nonexistent/ffmpeg")));
        assert_eq!(info.name, "ffmpeg");
        assert!(!info.available);
    }

    #[test]
    fn test_check_tools_names() {
        let missing = Path::new("/nonexistent/tool");
        let names: Vec<String> = check_tools(Some(missing), Some(missing))
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, REQUIRED_TOOLS);
    }

    #[test]
    fn test_require_tool_missing() {
        let err = require_tool("nonexistent_tool_12345").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool } if tool == "nonexistent_tool_12345"));
    }

    #[test]
    fn test_get_tool_path_prefers_configured() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("ffprobe");
        std::fs::write(&fake, b"").unwrap();
        assert_eq!(get_tool_path("ffprobe", Some(&fake)).unwrap(), fake);
    }

    #[test]
    fn test_get_tool_path_falls_back_to_path_lookup() {
        let err = get_tool_path(
            "nonexistent_tool_12345",
            Some(Path::new("/nonexistent/nonexistent_tool_12345")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
