// * CSV output with graceful degradation
// * Primary path -> timestamp-suffixed sibling -> preview in the log. Never fails the run.

use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::record::{CourseRecord, CSV_COLUMNS};

const PREVIEW_ROWS: usize = 5;

/// Where the records ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Fallback { primary: PathBuf, written: PathBuf },
    Preview(String),
}

impl SaveOutcome {
    pub fn written_path(&self) -> Option<&Path> {
        match self {
            SaveOutcome::Saved(path) => Some(path.as_path()),
            SaveOutcome::Fallback { written, .. } => Some(written.as_path()),
            SaveOutcome::Preview(_) => None,
        }
    }
}

/// Writes header plus one row per record as UTF-8 CSV.
pub fn write_csv(records: &[CourseRecord], path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.serialize(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

/// `courses.csv` -> `courses_20240101_120000.csv`, in the same directory.
pub fn fallback_path(path: &Path, timestamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "courses".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, timestamp, ext.to_string_lossy()),
        None => format!("{}_{}", stem, timestamp),
    };
    path.with_file_name(name)
}

/// Plain-text table of the first few records.
pub fn render_preview(records: &[CourseRecord]) -> String {
    let mut lines = vec![CSV_COLUMNS.join(" | ")];
    for record in records.iter().take(PREVIEW_ROWS) {
        let row = record.to_row();
        lines.push(
            [
                row.course_id,
                row.programming_language,
                row.course_name,
                row.course_duration,
                row.concepts.as_str(),
                row.course_level,
                row.course_link,
            ]
            .join(" | "),
        );
    }
    if records.len() > PREVIEW_ROWS {
        lines.push(format!("... {} more rows", records.len() - PREVIEW_ROWS));
    }
    lines.join("\n")
}

/// Saves the records, falling back instead of failing.
pub fn save_records(records: &[CourseRecord], path: &Path) -> SaveOutcome {
    let primary_err = match write_csv(records, path) {
        Ok(()) => {
            info!(rows = records.len(), path = %path.display(), "Saved CSV");
            return SaveOutcome::Saved(path.to_path_buf());
        }
        Err(e) => e,
    };

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup = fallback_path(path, &timestamp);
    warn!(
        path = %path.display(),
        "Could not write CSV ({}); trying {}", primary_err, backup.display()
    );

    match write_csv(records, &backup) {
        Ok(()) => {
            info!(
                rows = records.len(),
                path = %backup.display(),
                "Saved CSV to fallback file; close {} and rename it if needed",
                path.display()
            );
            SaveOutcome::Fallback {
                primary: path.to_path_buf(),
                written: backup,
            }
        }
        Err(e) => {
            let preview = render_preview(records);
            error!("Could not write fallback CSV ({}). Data preview:\n{}", e, preview);
            SaveOutcome::Preview(preview)
        }
    }
}
