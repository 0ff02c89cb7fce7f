// * Configuration Constants
// * Default values for every ScrapeConfig field. Nothing reads these directly at runtime;
// * they seed ScrapeConfig::default() and are overridden from the CLI.

// * Explicit-wait timeout for page readiness, in seconds
pub const READY_TIMEOUT_SECS: u64 = 25;

// * Hard ceiling on a single navigation, in seconds
pub const PAGE_LOAD_TIMEOUT_SECS: u64 = 60;

// * Pause between scroll batches on the search page (seconds, min..max)
pub const SCROLL_PAUSE_SECS: (f64, f64) = (1.2, 2.0);

// * Pause before parsing a detail page (seconds, min..max)
pub const DETAIL_PAUSE_SECS: (f64, f64) = (1.2, 2.0);

// * Backoff after a transient detail-page failure (seconds, min..max)
pub const RETRY_BACKOFF_SECS: (f64, f64) = (2.0, 3.5);

// * Politeness pause after every course attempt (seconds, min..max)
pub const COURSE_PAUSE_SECS: (f64, f64) = (0.8, 1.6);

// * Stop scrolling after this many consecutive rounds without new results
pub const MAX_IDLE_SCROLLS: u32 = 6;

// * Retries per course page on transient failures (attempts = 1 + RETRY_DETAIL)
pub const RETRY_DETAIL: u32 = 2;

// * Pixels for the up/down nudge that re-triggers lazy loading
pub const SCROLL_NUDGE_PX: i64 = 200;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/123.0 Safari/537.36";

pub const DEFAULT_KEYWORDS: &[&str] = &["Java", "Python", "C", "C++", "JavaScript", "HTML", "CSS", "SQL"];

// * Courses only; specializations and certificates are filtered out by the site
pub const SEARCH_URL_TEMPLATE: &str =
    "https://www.coursera.org/search?query={q}&productTypeDescription=courses";

pub const SITE_ORIGIN: &str = "https://www.coursera.org";

// * Path prefix shared by every course detail page
pub const COURSE_PATH_PREFIX: &str = "/learn/";

pub const OUTPUT_PATH: &str = "courses.csv";

// * Detail extraction limits
pub const MAX_CONCEPTS: usize = 30;
pub const MAX_DURATION_LEN: usize = 50;
