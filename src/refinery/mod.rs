// * The Refinery (Detail Extraction)
// * Turns rendered course-page markup into duration, level and concepts.
// * Every heuristic here is a pure function over parsed HTML; no I/O.

pub mod concepts;
pub mod detail;
pub mod duration;
pub mod text;

// * Re-exports for convenient access
pub use concepts::extract_concepts;
pub use detail::{extract_detail, extract_level, CourseDetail, ExtractError};
pub use duration::{extract_duration, DURATION_STRATEGIES};
pub use text::{classify_level, clean, extract_duration_pattern, sniff_duration_phrase, Level};
