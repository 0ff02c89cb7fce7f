// * Scrape Driver
// * One keyword: search, discover, then visit every course page with bounded retries.
// * Failures stop at the course boundary; only a failed search pass reaches the caller.

use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, warn};

use super::discovery::{discover, DiscoveredLink};
use super::pacing::Pacer;
use crate::browser::{BrowserError, PageHandle};
use crate::config::ScrapeConfig;
use crate::persistence::CourseRecord;
use crate::refinery::text::clean;
use crate::refinery::{extract_detail, CourseDetail, ExtractError};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl ScrapeError {
    pub fn is_transient(&self) -> bool {
        match self {
            ScrapeError::Browser(e) => e.is_transient(),
            ScrapeError::Extract(_) => false,
        }
    }
}

/// Per-keyword counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordStats {
    pub keyword: String,
    pub discovered: usize,
    pub scraped: usize,
    // * Transient failures on every attempt
    pub dropped: usize,
    // * Non-transient failure, not retried
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct KeywordHarvest {
    pub records: Vec<CourseRecord>,
    pub stats: KeywordStats,
}

/// Result of visiting one course page.
#[derive(Debug)]
pub enum CourseOutcome {
    Scraped(CourseDetail),
    Exhausted(ScrapeError),
    Skipped(ScrapeError),
}

/// Scrapes every course listed for `keyword`.
pub async fn scrape_keyword<P, W>(
    page: &mut P,
    keyword: &str,
    config: &ScrapeConfig,
    pacer: &W,
) -> Result<KeywordHarvest, ScrapeError>
where
    P: PageHandle + ?Sized,
    W: Pacer + ?Sized,
{
    info!(keyword, "Searching catalog");
    page.navigate(&config.search_url(keyword)).await?;
    page.wait_ready(config.ready_timeout).await?;
    pacer.pause(config.scroll_pause).await;

    let links = discover(page, config, pacer).await?;
    info!(keyword, links = links.len(), "Found course links");

    let mut harvest = KeywordHarvest {
        records: Vec::new(),
        stats: KeywordStats {
            keyword: keyword.to_string(),
            discovered: links.len(),
            ..Default::default()
        },
    };
    let mut seen: HashSet<String> = HashSet::new();

    for DiscoveredLink { title, url } in links {
        if !seen.insert(url.clone()) {
            continue;
        }

        match scrape_course(page, &title, &url, config, pacer).await {
            CourseOutcome::Scraped(detail) => {
                info!(
                    keyword,
                    duration = detail.duration.as_deref().unwrap_or("N/A"),
                    "Scraped {}", title
                );
                let ordinal = harvest.records.len() + 1;
                harvest
                    .records
                    .push(CourseRecord::provisional(ordinal, keyword, clean(&title), url, detail));
                harvest.stats.scraped += 1;
            }
            CourseOutcome::Exhausted(e) => {
                warn!(keyword, "Dropped {} after {} attempts: {}", title, config.detail_attempts(), e);
                harvest.stats.dropped += 1;
            }
            CourseOutcome::Skipped(e) => {
                warn!(keyword, "Skipped {}: {}", title, e);
                harvest.stats.skipped += 1;
            }
        }

        // * Politeness pause after every course, success or not
        pacer.pause(config.course_pause).await;
    }

    Ok(harvest)
}

/// Visits one detail page, retrying transient failures with backoff.
pub async fn scrape_course<P, W>(
    page: &mut P,
    title: &str,
    url: &str,
    config: &ScrapeConfig,
    pacer: &W,
) -> CourseOutcome
where
    P: PageHandle + ?Sized,
    W: Pacer + ?Sized,
{
    let attempts = config.detail_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;
        match fetch_detail(page, url, config, pacer).await {
            Ok(detail) => return CourseOutcome::Scraped(detail),
            Err(e) if e.is_transient() => {
                if attempt >= attempts {
                    return CourseOutcome::Exhausted(e);
                }
                warn!("Retry {}/{} for {}: {}", attempt, config.retry_detail, title, e);
                pacer.pause(config.retry_backoff).await;
            }
            Err(e) => return CourseOutcome::Skipped(e),
        }
    }
}

async fn fetch_detail<P, W>(
    page: &mut P,
    url: &str,
    config: &ScrapeConfig,
    pacer: &W,
) -> Result<CourseDetail, ScrapeError>
where
    P: PageHandle + ?Sized,
    W: Pacer + ?Sized,
{
    page.navigate(url).await?;
    page.wait_ready(config.ready_timeout).await?;
    pacer.pause(config.detail_pause).await;

    let markup = page.current_markup().await?;
    Ok(extract_detail(&markup)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_error_transience() {
        assert!(ScrapeError::from(BrowserError::Timeout(25_000)).is_transient());
        assert!(!ScrapeError::from(BrowserError::Closed).is_transient());
        assert!(!ScrapeError::from(ExtractError::EmptyDocument).is_transient());
    }
}
