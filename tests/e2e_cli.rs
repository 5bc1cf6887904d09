//! CLI end-to-end tests
//!
//! Tests for the frametally command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the frametally binary
#[allow(deprecated)]
fn frametally_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("frametally").unwrap();
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn write_config(dir: &Path) -> PathBuf {
    let config = dir.join("frametally.toml");
    fs::write(
        &config,
        format!(
            "[database]\npath = {:?}\n\n[output]\ndir = {:?}\n",
            dir.join("frames.db"),
            dir.join("out")
        ),
    )
    .unwrap();
    config
}

fn ingest(dir: &Path, config: &Path) {
    frametally_cmd(dir)
        .arg("--config")
        .arg(config)
        .arg("db")
        .arg("--xytech")
        .arg(fixture("Xytech_20230326.txt"))
        .arg("--files")
        .arg(fixture("Baselight_TDanza_20230326.txt"))
        .arg(fixture("Flame_MFelix_20230323.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored 2 logs (9 frame ranges)"));
}

#[test]
fn test_cli_no_args_shows_help() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frametally"));
}

#[test]
fn test_cli_version_command() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("frametally "));
}

#[test]
fn test_cli_check_tools_command() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("ffmpeg").and(predicate::str::contains("ffprobe")));
}

#[test]
fn test_cli_csv_writes_report() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");

    frametally_cmd(dir.path())
        .arg("csv")
        .arg("--xytech")
        .arg(fixture("Xytech_20230326.txt"))
        .arg("--files")
        .arg(fixture("Baselight_TDanza_20230326.txt"))
        .arg(fixture("Flame_MFelix_20230323.txt"))
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("output_20230323.csv"));

    let csv = fs::read_to_string(out.join("output_20230323.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    // One header row per note; locations only drive reconciliation.
    assert_eq!(
        lines[0],
        "Joan Jett,John Doe,Dune 2,Please clean up all frames listed by the stations."
    );
    assert!(!csv.contains("/hpsans13/production"));
    assert_eq!(lines.len(), 1 + 2 + 6 + 3);
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "");
    assert_eq!(
        &lines[3..9],
        [
            "hpsans13/Dune2/reel1/partA/1920x1080,2-4",
            "hpsans13/Dune2/reel1/partA/1920x1080,31-33",
            "hpsans13/Dune2/reel1/partA/1920x1080,67-70",
            "hpsans13/Dune2/reel1/partB/1920x1080,100-104",
            "hpsans12/Dune2/reel1/VFX/Hydraulx,1260-1262",
            "hpsans12/Dune2/reel1/VFX/Hydraulx,1267",
        ]
    );
    assert_eq!(
        &lines[9..],
        [
            "net/flame-archive hpsans13/Dune2/reel1/partA/1920x1080,8-9",
            "net/flame-archive hpsans14/Dune2/reel1/VFX/AnimalLogic,12-14",
            "net/flame-archive hpsans14/Dune2/reel1/VFX/AnimalLogic,20",
        ]
    );
}

#[test]
fn test_cli_csv_skips_unrecognised_logs() {
    let dir = tempdir().unwrap();
    let stray = dir.path().join("notes.txt");
    fs::write(&stray, "/a/b 1 2 3\n").unwrap();

    frametally_cmd(dir.path())
        .arg("csv")
        .arg("--xytech")
        .arg(fixture("Xytech_20230326.txt"))
        .arg("--files")
        .arg(&stray)
        .arg(fixture("Baselight_TDanza_20230326.txt"))
        .arg("--out-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping"));

    assert!(dir.path().join("output_20230326.csv").exists());
}

#[test]
fn test_cli_csv_fails_without_usable_logs() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .arg("csv")
        .arg("--xytech")
        .arg(fixture("Xytech_20230326.txt"))
        .arg("--files")
        .arg(dir.path().join("Baselight_Nobody_20230101.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No readable machine logs"));
}

#[test]
fn test_cli_csv_requires_xytech() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .args(["csv", "--files", "Baselight_TDanza_20230326.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--xytech"));
}

#[test]
fn test_cli_db_and_reports() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    ingest(dir.path(), &config);

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "user", "TDanza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user_on_file: TDanza"))
        .stdout(predicate::str::contains("date_of_file: 03/26/2023"))
        .stdout(predicate::str::contains("frame_range: 1260-1262"));

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "users", "flame"])
        .assert()
        .success()
        .stdout(predicate::eq("MFelix\n"));

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("machine: Baselight"))
        .stdout(predicate::str::contains("2 logs, 9 frame ranges"));

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "before", "2023-03-25", "Flame"])
        .assert()
        .success()
        .stdout(predicate::str::contains("machine: Flame"))
        .stdout(predicate::str::contains("TDanza").not());

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "before", "2023-03-23", "Flame"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching work found."));
}

#[test]
fn test_cli_report_json() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    ingest(dir.path(), &config);

    let output = frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["report", "location", "hpsans13", "2023-03-26", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows
        .iter()
        .all(|r| r["location"].as_str().unwrap().contains("hpsans13")));
}

#[test]
fn test_cli_report_rejects_bad_date() {
    let dir = tempdir().unwrap();
    frametally_cmd(dir.path())
        .args(["report", "location", "hpsans13", "26/03/2023"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_cli_process_missing_video() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(dir.path().join("twgok_600.mp4"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

/// A 1x1 RGBA PNG.
#[cfg(unix)]
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Stand-in ffprobe and ffmpeg: a 40 second 60fps video, and a one-pixel
/// thumbnail for every extraction.
#[cfg(unix)]
fn stub_tools(dir: &Path) -> (PathBuf, PathBuf) {
    let pixel = dir.join("pixel.png");
    fs::write(&pixel, PIXEL_PNG).unwrap();

    let ffprobe = dir.join("ffprobe");
    write_script(
        &ffprobe,
        "cat <<'JSON'\n\
         {\"streams\":[{\"codec_type\":\"video\",\"r_frame_rate\":\"60/1\"}],\"format\":{\"duration\":\"40.0\"}}\n\
         JSON\n",
    );

    let ffmpeg = dir.join("ffmpeg");
    write_script(
        &ffmpeg,
        &format!("for last; do :; done\ncp {:?} \"$last\"\n", pixel),
    );

    (ffmpeg, ffprobe)
}

#[cfg(unix)]
#[test]
fn test_cli_process_writes_workbook() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let (ffmpeg, ffprobe) = stub_tools(dir.path());
    let mut text = fs::read_to_string(&config).unwrap();
    text.push_str(&format!(
        "\n[tools]\nffmpeg_path = {:?}\nffprobe_path = {:?}\n",
        ffmpeg, ffprobe
    ));
    fs::write(&config, text).unwrap();

    ingest(dir.path(), &config);

    let video = dir.path().join("twgok_600.mp4");
    fs::write(&video, b"not really a video").unwrap();

    frametally_cmd(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&video)
        .assert()
        .success()
        .stdout(predicate::str::contains("video-information.xlsx"));

    let out = dir.path().join("out");
    let workbook = fs::read(out.join("video-information.xlsx")).unwrap();
    assert!(workbook.starts_with(b"PK"));

    // Thumbnails are scratch files embedded in the workbook.
    let leftovers: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(leftovers, ["video-information.xlsx"]);
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    frametally_cmd(dir.path())
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Default fps: 60"));
}

#[test]
fn test_cli_validate_rejects_zero_fps() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[video]\ndefault_fps = 0\n").unwrap();

    frametally_cmd(dir.path())
        .arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_fps"));
}
