// * Page-handle capability
// * The scraping core never talks to the browser directly. It sees one exclusively-owned
// * page through this trait, which the Chromium session implements and tests fake.

pub mod chromium;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use chromium::ChromiumSession;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Page navigation failed: {0}")]
    Navigation(String),

    #[error("Page timeout after {0}ms")]
    Timeout(u64),

    #[error("Script execution failed: {0}")]
    Script(String),

    #[error("Content extraction failed: {0}")]
    Content(String),

    #[error("Browser session is closed")]
    Closed,
}

impl BrowserError {
    /// Whether retrying the same page can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BrowserError::Navigation(_) | BrowserError::Timeout(_) | BrowserError::Content(_)
        )
    }
}

/// A scroll gesture on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    ToBottom,
    By(i64),
}

impl ScrollAction {
    pub fn script(&self) -> String {
        match self {
            ScrollAction::ToBottom => "window.scrollTo(0, document.body.scrollHeight);".to_string(),
            ScrollAction::By(dy) => format!("window.scrollBy(0, {});", dy),
        }
    }
}

#[async_trait]
pub trait PageHandle: Send {
    /// Loads `url` in the page, replacing the current document.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Blocks until the document has a body, or fails with `Timeout`.
    async fn wait_ready(&mut self, timeout: Duration) -> Result<(), BrowserError>;

    async fn scroll(&mut self, action: ScrollAction) -> Result<(), BrowserError>;

    /// Rendered markup of the current document.
    async fn current_markup(&mut self) -> Result<String, BrowserError>;
}
