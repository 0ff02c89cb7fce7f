// * Result-Set Discoverer
// * Drives the infinite-scroll search page until the result list stops growing.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};
use url::Url;

use super::pacing::Pacer;
use crate::browser::{BrowserError, PageHandle, ScrollAction};
use crate::config::ScrapeConfig;
use crate::refinery::text::{clean, element_text_raw};

static SELECTOR_ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// A course card found on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    pub title: String,
    pub url: String,
}

/// Absolute link for a course card's `href`, resolved against the site origin.
///
/// The query is kept as served; only the fragment is dropped.
pub fn course_url(href: &str, origin: &str) -> Option<String> {
    let mut url = Url::parse(origin).ok()?.join(href).ok()?;
    url.set_fragment(None);
    Some(url.into())
}

/// Course links in the markup, deduplicated by URL, first occurrence kept.
pub fn snapshot_links(markup: &str, origin: &str, path_prefix: &str) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(markup);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&SELECTOR_ANCHORS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.is_empty() || !href.starts_with(path_prefix) {
            continue;
        }

        let title = match anchor.value().attr("aria-label") {
            Some(label) if !label.trim().is_empty() => clean(label),
            _ => element_text_raw(&anchor),
        };
        if title.is_empty() {
            continue;
        }

        let Some(url) = course_url(href, origin) else {
            debug!("Unjoinable course href: {}", href);
            continue;
        };

        if seen.insert(url.clone()) {
            links.push(DiscoveredLink { title, url });
        }
    }

    links
}

/// Scrolls the current search page until `max_idle_scrolls` consecutive rounds add nothing.
///
/// There is no round ceiling: termination relies on the catalog running out of results.
/// Scroll failures are ignored for the round; a failed re-read keeps the previous snapshot.
pub async fn discover<P, W>(
    page: &mut P,
    config: &ScrapeConfig,
    pacer: &W,
) -> Result<Vec<DiscoveredLink>, BrowserError>
where
    P: PageHandle + ?Sized,
    W: Pacer + ?Sized,
{
    let snapshot = |markup: &str| {
        snapshot_links(markup, &config.site_origin, &config.course_path_prefix)
    };

    let mut results = snapshot(&page.current_markup().await?);
    let mut idle: u32 = 0;
    let mut round: u32 = 0;

    debug!(initial = results.len(), "Discovery started");

    while idle < config.max_idle_scrolls {
        round += 1;
        let prev_count = results.len();

        scroll_quietly(page, ScrollAction::ToBottom).await;
        pacer.pause(config.scroll_pause).await;

        // * Some lazy loaders only fire on a change of scroll direction
        scroll_quietly(page, ScrollAction::By(-config.scroll_nudge_px)).await;
        scroll_quietly(page, ScrollAction::By(config.scroll_nudge_px)).await;
        pacer.pause(config.scroll_pause).await;

        match page.current_markup().await {
            Ok(markup) => results = snapshot(&markup),
            Err(e) => debug!(round, "Snapshot failed, keeping previous results: {}", e),
        }

        if results.len() <= prev_count {
            idle += 1;
        } else {
            idle = 0;
        }
        debug!(round, found = results.len(), idle, "Scroll round complete");
    }

    info!(rounds = round, found = results.len(), "Discovery settled");
    Ok(results)
}

async fn scroll_quietly<P: PageHandle + ?Sized>(page: &mut P, action: ScrollAction) {
    if let Err(e) = page.scroll(action).await {
        debug!(?action, "Scroll ignored: {}", e);
    }
}
