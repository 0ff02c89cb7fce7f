#![allow(dead_code)]

// * Scripted page for driving the engine without a browser

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use course_sweep::browser::{BrowserError, PageHandle, ScrollAction};
use course_sweep::config::ScrapeConfig;

pub const ORIGIN: &str = "https://www.coursera.org";

#[derive(Debug, Default)]
pub struct FakePage {
    // * URL -> markup per read; the last entry repeats
    sequences: HashMap<String, Vec<String>>,
    // * URL -> remaining transient navigation failures
    flaky: HashMap<String, u32>,
    // * URLs whose navigation fails with a non-transient error
    broken: Vec<String>,
    scroll_fails: bool,
    current: Option<String>,
    pub reads: HashMap<String, usize>,
    pub navigations: Vec<String>,
    pub scrolls: usize,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, markup: impl Into<String>) -> Self {
        self.sequences.insert(url.to_string(), vec![markup.into()]);
        self
    }

    pub fn feed(mut self, url: &str, markups: Vec<String>) -> Self {
        self.sequences.insert(url.to_string(), markups);
        self
    }

    pub fn flaky(mut self, url: &str, failures: u32) -> Self {
        self.flaky.insert(url.to_string(), failures);
        self
    }

    pub fn broken(mut self, url: &str) -> Self {
        self.broken.push(url.to_string());
        self
    }

    pub fn failing_scrolls(mut self) -> Self {
        self.scroll_fails = true;
        self
    }

    pub fn visits(&self, url: &str) -> usize {
        self.navigations.iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.navigations.push(url.to_string());
        if self.broken.iter().any(|u| u == url) {
            return Err(BrowserError::Script("renderer crashed".into()));
        }
        if let Some(left) = self.flaky.get_mut(url) {
            if *left > 0 {
                *left -= 1;
                return Err(BrowserError::Timeout(25_000));
            }
        }
        if !self.sequences.contains_key(url) {
            return Err(BrowserError::Navigation(format!("no such page: {}", url)));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn wait_ready(&mut self, _timeout: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn scroll(&mut self, _action: ScrollAction) -> Result<(), BrowserError> {
        self.scrolls += 1;
        if self.scroll_fails {
            return Err(BrowserError::Script("scroll blocked".into()));
        }
        Ok(())
    }

    async fn current_markup(&mut self) -> Result<String, BrowserError> {
        let url = self.current.clone().ok_or(BrowserError::Closed)?;
        let seq = self.sequences.get(&url).ok_or(BrowserError::Closed)?;
        let count = self.reads.entry(url).or_insert(0);
        let markup = seq[(*count).min(seq.len() - 1)].clone();
        *count += 1;
        Ok(markup)
    }
}

pub fn config_for(keywords: &[&str]) -> ScrapeConfig {
    let mut config = ScrapeConfig::default().without_pacing();
    config.keywords = keywords.iter().map(|k| k.to_string()).collect();
    config
}

/// Search results page listing `/learn/<slug>` cards.
pub fn search_page(slugs: &[&str]) -> String {
    let cards: String = slugs
        .iter()
        .map(|slug| format!(r#"<li><a href="/learn/{0}" aria-label="Course {0}">{0}</a></li>"#, slug))
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", cards)
}

pub fn course_link(slug: &str) -> String {
    format!("{}/learn/{}", ORIGIN, slug)
}

pub fn detail_page(duration: &str, level: &str, concepts: &[&str]) -> String {
    let items: String = concepts.iter().map(|c| format!("<li>{}</li>", c)).collect();
    format!(
        r#"<html><head>
            <script type="application/ld+json">{{"@type": "Course", "timeRequired": "{}"}}</script>
        </head><body>
            <div class="banner"><span>{} level</span></div>
            <section><h2>What you'll learn</h2><ul>{}</ul></section>
        </body></html>"#,
        duration, level, items
    )
}
