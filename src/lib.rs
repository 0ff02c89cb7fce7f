// * Course Sweep
// * Keyword-driven catalog scraper: discover course links on an infinite-scroll search page,
// * pull duration, level and concepts from every detail page, and write one CSV.

pub mod browser;
pub mod config;
pub mod engine;
pub mod ops;
pub mod persistence;
pub mod refinery;
