//! Report files.
//!
//! Two files are produced: `output_{YYYYMMDD}.csv` from a reconciled
//! batch, and the `video-information.xlsx` workbook from the video report.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use frametally_parser::location::LOCATION_ATTRIBUTE;
use frametally_parser::CanonicalRecord;
use rust_xlsxwriter::{Image, Workbook};

use crate::ingest::Batch;

/// File name of the video report.
pub const VIDEO_REPORT_FILE: &str = "video-information.xlsx";

/// Worksheet holding the video report.
pub const VIDEO_REPORT_SHEET: &str = "Video Information";

/// Header row of the video report.
pub const VIDEO_REPORT_HEADERS: [&str; 4] =
    ["Location", "Frame Range", "Time Code Range", "Thumbnail"];

/// Quote a field when it holds a delimiter, quote or line break.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// One row per item of every work-order list except `Location`, each
/// prefixed by every scalar value.
pub fn work_order_rows(work_order: &CanonicalRecord) -> String {
    let prefix: String = work_order
        .scalars()
        .map(|(_, value)| format!("{},", csv_field(value)))
        .collect();

    work_order
        .attributes()
        .filter(|(name, _)| *name != LOCATION_ATTRIBUTE)
        .filter_map(|(_, value)| value.as_list())
        .flatten()
        .map(|item| format!("{}{}\n", prefix, csv_field(item)))
        .collect()
}

/// Render a batch: work-order rows, a blank line, then each log's merged
/// records introduced by a newline.
pub fn render_batch_csv(batch: &Batch) -> String {
    let mut out = work_order_rows(&batch.work_order);
    out.push('\n');

    for log in &batch.logs {
        out.push('\n');
        let lines: Vec<String> = log
            .records
            .iter()
            .map(|r| format!("{},{}", csv_field(&r.display_path), r.range))
            .collect();
        out.push_str(&lines.join("\n"));
    }

    out
}

/// Write `output_{date}.csv` into `out_dir`, returning its path.
pub fn write_batch_csv(batch: &Batch, out_dir: &Path) -> Result<PathBuf> {
    let date = batch
        .output_date()
        .context("Cannot name CSV output without a machine log")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let path = out_dir.join(format!("output_{}.csv", date));
    std::fs::write(&path, render_batch_csv(batch))
        .with_context(|| format!("Failed to write CSV: {:?}", path))?;

    tracing::info!("Wrote {:?}", path);
    Ok(path)
}

/// One row of the video report.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
    pub location: String,
    pub frame_range: String,
    pub timecode_range: String,
    /// Image embedded in the thumbnail cell; missing when extraction failed.
    pub thumbnail: Option<PathBuf>,
}

/// Lay the video report out as a single-sheet workbook.
///
/// Thumbnails are read into the workbook here, so the image files may be
/// removed once this returns.
pub fn video_workbook(rows: &[VideoRow]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(VIDEO_REPORT_SHEET)?;

    for (col, header) in (0u16..).zip(VIDEO_REPORT_HEADERS) {
        sheet.write_string(0, col, header)?;
    }

    for (row, video_row) in (1u32..).zip(rows) {
        sheet.write_string(row, 0, &video_row.location)?;
        sheet.write_string(row, 1, &video_row.frame_range)?;
        sheet.write_string(row, 2, &video_row.timecode_range)?;

        if let Some(path) = &video_row.thumbnail {
            let image = Image::new(path)
                .with_context(|| format!("Failed to load thumbnail {:?}", path))?;
            sheet.insert_image(row, 3, &image)?;
        }
    }

    Ok(workbook)
}

/// Write the video report into `out_dir`, returning its path.
pub fn write_video_report(rows: &[VideoRow], out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let path = out_dir.join(VIDEO_REPORT_FILE);
    video_workbook(rows)?
        .save(&path)
        .with_context(|| format!("Failed to write workbook: {:?}", path))?;

    tracing::info!("Wrote {:?} ({} rows)", path, rows.len());
    Ok(path)
}
