// * Run orchestration
// * Keywords are processed strictly in order on one page. A keyword that fails outright is
// * logged and counted; the run carries on with the next one.

use tracing::{error, info};

use super::driver::{scrape_keyword, KeywordStats};
use super::pacing::Pacer;
use crate::browser::PageHandle;
use crate::config::ScrapeConfig;
use crate::persistence::{resequence, CourseRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub keywords: Vec<KeywordStats>,
    pub failed_keywords: Vec<String>,
}

impl RunSummary {
    pub fn total_scraped(&self) -> usize {
        self.keywords.iter().map(|k| k.scraped).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.keywords.iter().map(|k| k.dropped + k.skipped).sum()
    }

    pub fn success_rate(&self) -> f64 {
        let scraped = self.total_scraped() as f64;
        let total = scraped + self.total_dropped() as f64;
        if total > 0.0 {
            scraped / total
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct RunOutcome {
    pub records: Vec<CourseRecord>,
    pub summary: RunSummary,
}

/// Scrapes every configured keyword and assigns run-wide ids.
pub async fn run<P, W>(page: &mut P, config: &ScrapeConfig, pacer: &W) -> RunOutcome
where
    P: PageHandle + ?Sized,
    W: Pacer + ?Sized,
{
    let mut outcome = RunOutcome::default();

    for keyword in &config.keywords {
        match scrape_keyword(page, keyword, config, pacer).await {
            Ok(harvest) => {
                info!(
                    keyword = %keyword,
                    scraped = harvest.stats.scraped,
                    dropped = harvest.stats.dropped,
                    skipped = harvest.stats.skipped,
                    "Keyword finished"
                );
                outcome.records.extend(harvest.records);
                outcome.summary.keywords.push(harvest.stats);
            }
            Err(e) => {
                error!(keyword = %keyword, "Keyword failed: {}", e);
                outcome.summary.failed_keywords.push(keyword.clone());
            }
        }
    }

    resequence(&mut outcome.records);
    info!(
        records = outcome.records.len(),
        failed_keywords = outcome.summary.failed_keywords.len(),
        "Run complete"
    );
    outcome
}
