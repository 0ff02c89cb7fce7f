// * Run configuration
// * One immutable ScrapeConfig is built at startup and borrowed by every component.

pub mod constants;

use std::path::PathBuf;
use std::time::Duration;

use url::form_urlencoded;

use constants::*;

/// Closed range of seconds for a randomized pause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl PauseRange {
    pub const ZERO: PauseRange = PauseRange {
        min_secs: 0.0,
        max_secs: 0.0,
    };

    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        // * Swapped or negative bounds are normalized rather than rejected
        let lo = min_secs.max(0.0);
        let hi = max_secs.max(0.0);
        if lo <= hi {
            Self { min_secs: lo, max_secs: hi }
        } else {
            Self { min_secs: hi, max_secs: lo }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.max_secs <= 0.0
    }
}

impl From<(f64, f64)> for PauseRange {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::new(lo, hi)
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub headless: bool,
    pub ready_timeout: Duration,
    pub page_load_timeout: Duration,
    pub scroll_pause: PauseRange,
    pub detail_pause: PauseRange,
    pub retry_backoff: PauseRange,
    pub course_pause: PauseRange,
    pub max_idle_scrolls: u32,
    pub retry_detail: u32,
    pub scroll_nudge_px: i64,
    pub user_agent: String,
    pub keywords: Vec<String>,
    pub search_url_template: String,
    pub site_origin: String,
    pub course_path_prefix: String,
    pub output_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            ready_timeout: Duration::from_secs(READY_TIMEOUT_SECS),
            page_load_timeout: Duration::from_secs(PAGE_LOAD_TIMEOUT_SECS),
            scroll_pause: SCROLL_PAUSE_SECS.into(),
            detail_pause: DETAIL_PAUSE_SECS.into(),
            retry_backoff: RETRY_BACKOFF_SECS.into(),
            course_pause: COURSE_PAUSE_SECS.into(),
            max_idle_scrolls: MAX_IDLE_SCROLLS,
            retry_detail: RETRY_DETAIL,
            scroll_nudge_px: SCROLL_NUDGE_PX,
            user_agent: USER_AGENT.to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            search_url_template: SEARCH_URL_TEMPLATE.to_string(),
            site_origin: SITE_ORIGIN.to_string(),
            course_path_prefix: COURSE_PATH_PREFIX.to_string(),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl ScrapeConfig {
    /// Same settings with every pause collapsed to zero.
    pub fn without_pacing(mut self) -> Self {
        self.scroll_pause = PauseRange::ZERO;
        self.detail_pause = PauseRange::ZERO;
        self.retry_backoff = PauseRange::ZERO;
        self.course_pause = PauseRange::ZERO;
        self
    }

    /// Total attempts allowed per detail page.
    pub fn detail_attempts(&self) -> u32 {
        self.retry_detail.saturating_add(1)
    }

    /// Builds the search-results URL for a keyword.
    ///
    /// The keyword is form-encoded, so `C++` becomes `C%2B%2B` and spaces become `+`.
    pub fn search_url(&self, keyword: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        self.search_url_template.replace("{q}", &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_keyword() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.search_url("C++"),
            "https://www.coursera.org/search?query=C%2B%2B&productTypeDescription=courses"
        );
        assert!(config.search_url("Data Science").contains("query=Data+Science"));
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = ScrapeConfig::default();
        assert_eq!(config.ready_timeout, Duration::from_secs(25));
        assert_eq!(config.max_idle_scrolls, 6);
        assert_eq!(config.detail_attempts(), 3);
        assert_eq!(config.keywords.len(), 8);
        assert_eq!(config.output_path, PathBuf::from("courses.csv"));
    }

    #[test]
    fn test_without_pacing_zeroes_every_pause() {
        let config = ScrapeConfig::default().without_pacing();
        assert!(config.scroll_pause.is_zero());
        assert!(config.detail_pause.is_zero());
        assert!(config.retry_backoff.is_zero());
        assert!(config.course_pause.is_zero());
    }

    #[test]
    fn test_pause_range_normalizes_bounds() {
        let range = PauseRange::new(2.0, 1.0);
        assert_eq!(range.min_secs, 1.0);
        assert_eq!(range.max_secs, 2.0);

        let clamped = PauseRange::new(-1.0, 0.5);
        assert_eq!(clamped.min_secs, 0.0);
    }

    #[test]
    fn test_detail_attempts_saturates() {
        let mut config = ScrapeConfig::default();
        assert_eq!(config.detail_attempts(), 3);
        config.retry_detail = u32::MAX;
        assert_eq!(config.detail_attempts(), u32::MAX);
    }
}
