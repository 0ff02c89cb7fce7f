// * Headless Chromium session
// * Owns the one browser and the one page the whole run drives. Launched once at startup,
// * shut down unconditionally by the binary at the end of the run.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{BrowserError, PageHandle, ScrollAction};
use crate::config::ScrapeConfig;

// * Masks the automation flags the catalog checks before serving results
const STEALTH_PAYLOAD: &str = r#"
(() => {
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true
    });
    Object.defineProperty(navigator, 'languages', {
        get: () => ['en-US', 'en'],
        configurable: true
    });
})();
"#;

// * Equivalent of waiting for presence of <body>
const READY_PROBE: &str = "document.readyState !== 'loading' && !!document.body";

const READY_POLL_INTERVAL_MS: u64 = 250;

const WINDOW_WIDTH: u32 = 1440;
const WINDOW_HEIGHT: u32 = 900;

pub struct ChromiumSession {
    browser: Option<Browser>,
    handler: Option<tokio::task::JoinHandle<()>>,
    page: Option<Page>,
    page_load_timeout: Duration,
}

impl ChromiumSession {
    /// Launches Chromium and opens the working page.
    pub async fn launch(config: &ScrapeConfig) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .arg("--disable-gpu")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", config.user_agent));

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // * The CDP connection only makes progress while its handler is polled
        let handle = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        info!(headless = config.headless, "Chromium session launched");

        Ok(Self {
            browser: Some(browser),
            handler: Some(handle),
            page: Some(page),
            page_load_timeout: config.page_load_timeout,
        })
    }

    fn page(&self) -> Result<&Page, BrowserError> {
        self.page.as_ref().ok_or(BrowserError::Closed)
    }

    /// Closes the page and the browser and stops the event loop. Safe to call twice.
    pub async fn shutdown(&mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Page close failed: {}", e);
            }
        }
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Browser close failed: {}", e);
            }
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        info!("Chromium session shut down");
    }
}

#[async_trait]
impl PageHandle for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let timeout = self.page_load_timeout;
        let page = self.page()?;

        match tokio::time::timeout(timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(BrowserError::Navigation(e.to_string())),
            Err(_) => return Err(BrowserError::Timeout(timeout.as_millis() as u64)),
        }

        // * Best effort; a page that rejects the payload is still usable
        if let Err(e) = page.evaluate(STEALTH_PAYLOAD).await {
            debug!("Stealth payload rejected on {}: {}", url, e);
        }

        Ok(())
    }

    async fn wait_ready(&mut self, timeout: Duration) -> Result<(), BrowserError> {
        let page = self.page()?;

        let probe = async {
            loop {
                match page.evaluate(READY_PROBE).await {
                    Ok(result) => {
                        if result.into_value::<bool>().unwrap_or(false) {
                            return;
                        }
                    }
                    Err(e) => debug!("Readiness probe failed: {}", e),
                }
                tokio::time::sleep(Duration::from_millis(READY_POLL_INTERVAL_MS)).await;
            }
        };

        tokio::time::timeout(timeout, probe)
            .await
            .map_err(|_| BrowserError::Timeout(timeout.as_millis() as u64))
    }

    async fn scroll(&mut self, action: ScrollAction) -> Result<(), BrowserError> {
        self.page()?
            .evaluate(action.script())
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Script(e.to_string()))
    }

    async fn current_markup(&mut self) -> Result<String, BrowserError> {
        self.page()?
            .content()
            .await
            .map_err(|e| BrowserError::Content(e.to_string()))
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        // * Can't await in drop; shutdown() is the real cleanup path
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
