// * Detail Extractor
// * Duration, level and concepts from one rendered course page.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

use super::concepts::extract_concepts;
use super::duration::extract_duration;
use super::text::{classify_level, element_text_raw, Level};

static SELECTOR_LEVEL_CARRIERS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, div, li").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Detail page has no content")]
    EmptyDocument,
}

/// Structured facts recovered from a detail page. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDetail {
    pub duration: Option<String>,
    pub level: Option<Level>,
    pub concepts: Vec<String>,
}

/// Parses the markup and runs all three extractors.
pub fn extract_detail(markup: &str) -> Result<CourseDetail, ExtractError> {
    if markup.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    let document = Html::parse_document(markup);
    Ok(CourseDetail {
        duration: extract_duration(&document),
        level: extract_level(&document),
        concepts: extract_concepts(&document),
    })
}

/// First text-bearing element, in document order, whose text names a level.
pub fn extract_level(document: &Html) -> Option<Level> {
    document
        .select(&SELECTOR_LEVEL_CARRIERS)
        .find_map(|el| classify_level(&element_text_raw(&el)))
}
