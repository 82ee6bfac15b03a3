// src/render/browser.rs
// =============================================================================
// A renderer backed by a real Chromium, driven over the DevTools protocol.
//
// One browser, one tab, reused for every page of the crawl. Anchors are read
// by evaluating a script in the page, so links added by JavaScript are seen
// too.
//
// Lifecycle:
// - launch() starts Chromium and spawns the task that pumps its event stream
// - close() asks Chromium to exit, waits for the process, stops the task
// =============================================================================

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::PageRenderer;
use crate::config::CrawlConfig;
use crate::error::CrawlError;

// Same values a page script would get from `anchor.href`; SVG anchors expose
// an object there, so anything that is not a string becomes null
const ANCHOR_HREFS_SCRIPT: &str = r#"
    Array.from(document.querySelectorAll('a'), (a) =>
        typeof a.href === 'string' ? a.href : null)
"#;

pub struct BrowserRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    timeout: Duration,
    current: Option<String>,
}

impl BrowserRenderer {
    pub async fn launch(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let mut builder = BrowserConfig::builder().request_timeout(config.timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(CrawlError::Renderer)?;

        info!(headless = config.headless, "launching browser");
        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CrawlError::Renderer(e.to_string()))?;

        // The browser only makes progress while its event stream is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // No renderer will exist to close it later, so do it here
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(CrawlError::Renderer(format!("could not open a tab: {}", e)));
            }
        };

        Ok(Self {
            browser,
            handler,
            page,
            timeout: config.timeout,
            current: None,
        })
    }
}

#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        self.current = None;

        match tokio::time::timeout(self.timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(CrawlError::navigation(url, e)),
            Err(_) => {
                return Err(CrawlError::navigation(
                    url,
                    format!("timed out after {}s", self.timeout.as_secs()),
                ))
            }
        }

        self.current = Some(url.to_string());
        Ok(())
    }

    async fn query_anchor_hrefs(&mut self) -> Result<Vec<Option<String>>, CrawlError> {
        let url = self
            .current
            .clone()
            .ok_or_else(|| CrawlError::scrape("about:blank", "no page is loaded"))?;

        let result = self
            .page
            .evaluate(ANCHOR_HREFS_SCRIPT)
            .await
            .map_err(|e| CrawlError::scrape(&url, e))?;

        result
            .into_value::<Vec<Option<String>>>()
            .map_err(|e| CrawlError::scrape(&url, format!("unexpected script result: {}", e)))
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        info!("closing browser");
        let closed = self.browser.close().await;

        if let Err(e) = self.browser.wait().await {
            warn!("failed to wait for browser exit: {}", e);
        }
        self.handler.abort();

        closed
            .map(|_| ())
            .map_err(|e| CrawlError::Renderer(format!("browser did not close cleanly: {}", e)))
    }
}
