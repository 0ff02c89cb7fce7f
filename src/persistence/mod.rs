// * Persistence
// * Course records, global resequencing and the CSV writer.

pub mod csv_store;
pub mod record;

// * Re-exports for convenient access
pub use csv_store::{fallback_path, render_preview, save_records, write_csv, SaveOutcome};
pub use record::{resequence, CourseRecord, CsvRow, CONCEPT_SEPARATOR, CSV_COLUMNS, SENTINEL};
