// * Course records
// * One row per successfully extracted course. Ids are provisional until the whole run is
// * resequenced.

use serde::Serialize;

use crate::refinery::{CourseDetail, Level};

// * Placeholder for any field the extractor could not recover
pub const SENTINEL: &str = "N/A";

pub const CONCEPT_SEPARATOR: &str = "; ";

/// Output columns, in order.
pub const CSV_COLUMNS: [&str; 7] = [
    "course_id",
    "programming_language",
    "course_name",
    "course_duration",
    "concepts",
    "course_level",
    "course_link",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub course_id: String,
    pub search_keyword: String,
    pub title: String,
    pub duration: Option<String>,
    pub concepts: Vec<String>,
    pub level: Option<Level>,
    pub link: String,
}

impl CourseRecord {
    /// Builds a record with a per-keyword provisional id (`C0001`, `C0002`, ...).
    pub fn provisional(
        ordinal: usize,
        keyword: &str,
        title: String,
        link: String,
        detail: CourseDetail,
    ) -> Self {
        Self {
            course_id: format!("C{:04}", ordinal),
            search_keyword: keyword.to_string(),
            title,
            duration: detail.duration,
            concepts: detail.concepts,
            level: detail.level,
            link,
        }
    }

    pub fn duration_display(&self) -> &str {
        self.duration.as_deref().unwrap_or(SENTINEL)
    }

    pub fn level_display(&self) -> &str {
        self.level.map(|l| l.as_str()).unwrap_or(SENTINEL)
    }

    pub fn concepts_display(&self) -> String {
        if self.concepts.is_empty() {
            SENTINEL.to_string()
        } else {
            self.concepts.join(CONCEPT_SEPARATOR)
        }
    }

    /// Flattened row in output column order.
    pub fn to_row(&self) -> CsvRow<'_> {
        CsvRow {
            course_id: &self.course_id,
            programming_language: &self.search_keyword,
            course_name: &self.title,
            course_duration: self.duration_display(),
            concepts: self.concepts_display(),
            course_level: self.level_display(),
            course_link: &self.link,
        }
    }
}

/// Serialized shape of one output row. Field order is the column order.
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub course_id: &'a str,
    pub programming_language: &'a str,
    pub course_name: &'a str,
    pub course_duration: &'a str,
    pub concepts: String,
    pub course_level: &'a str,
    pub course_link: &'a str,
}

/// Replaces every id with a run-wide ordinal (`C00001`, ...), in accumulation order.
pub fn resequence(records: &mut [CourseRecord]) {
    for (i, record) in records.iter_mut().enumerate() {
        record.course_id = format!("C{:05}", i + 1);
    }
}
