// * Scraping engine
// * Search-page discovery, per-course retries and the keyword loop.

pub mod discovery;
pub mod driver;
pub mod pacing;
pub mod runner;

pub use discovery::{course_url, discover, snapshot_links, DiscoveredLink};
pub use driver::{scrape_course, scrape_keyword, CourseOutcome, KeywordHarvest, KeywordStats, ScrapeError};
pub use pacing::{JitterPacer, NoPacing, Pacer};
pub use runner::{run, RunOutcome, RunSummary};
