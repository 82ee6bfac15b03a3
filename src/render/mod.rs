// src/render/mod.rs
// =============================================================================
// Page renderers: the things that actually load pages for the crawler.
//
// The crawler only needs three capabilities from a renderer:
// - navigate(url): load a page (fails with CrawlError::Navigation)
// - wait_fixed_delay(d): pause on the loaded page
// - query_anchor_hrefs(): the resolved href of every <a> on the page
//   (fails with CrawlError::Scrape)
// plus close(), which the runner calls exactly once when the crawl ends.
//
// Submodules:
// - http: reqwest + scraper, the default
// - browser: a real Chromium instance (cargo feature "browser")
// - mock: scripted renderer for tests
// =============================================================================

mod http;

#[cfg(feature = "browser")]
mod browser;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{CrawlConfig, RendererKind};
use crate::error::CrawlError;

pub use http::HttpRenderer;

#[cfg(feature = "browser")]
pub use browser::BrowserRenderer;

#[async_trait]
pub trait PageRenderer: Send {
    /// Loads `url`, replacing whatever page was loaded before
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError>;

    /// Holds on the current page. No backoff, no jitter.
    async fn wait_fixed_delay(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    /// Returns the href of every anchor on the current page, in document
    /// order. `None` marks an anchor without a usable href.
    async fn query_anchor_hrefs(&mut self) -> Result<Vec<Option<String>>, CrawlError>;

    /// Releases the renderer (browser process, connections)
    async fn close(&mut self) -> Result<(), CrawlError>;
}

// Builds the renderer selected in the config
pub async fn launch(config: &CrawlConfig) -> Result<Box<dyn PageRenderer>, CrawlError> {
    match config.renderer {
        RendererKind::Http => Ok(Box::new(HttpRenderer::new(config)?)),
        RendererKind::Browser => launch_browser(config).await,
    }
}

#[cfg(feature = "browser")]
async fn launch_browser(config: &CrawlConfig) -> Result<Box<dyn PageRenderer>, CrawlError> {
    Ok(Box::new(BrowserRenderer::launch(config).await?))
}

#[cfg(not(feature = "browser"))]
async fn launch_browser(_config: &CrawlConfig) -> Result<Box<dyn PageRenderer>, CrawlError> {
    Err(CrawlError::Renderer(
        "this build has no browser support (rebuild with --features browser)".to_string(),
    ))
}
