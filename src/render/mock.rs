// src/render/mock.rs
// =============================================================================
// A scripted, in-memory renderer for tests.
//
// Each known URL maps to the hrefs its page returns, or to a failure. Unknown
// URLs fail navigation as unreachable. Every call is recorded in a shared
// RenderLog so a test can still inspect it after the renderer was handed to
// (and consumed by) the crawl runner.
//
// Example:
//   let renderer = ScriptedRenderer::new()
//       .page("https://site.example/a", &["https://site.example/b"])
//       .failing_navigation("https://site.example/b");
//   let log = renderer.log();   // keep a handle before boxing it
//
// Rust concepts:
// - Arc<Mutex<...>>: shared, mutable call log that outlives the renderer
// - builder methods taking `mut self`: chain .page(...).page(...) calls
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::PageRenderer;
use crate::error::CrawlError;

// What a scripted URL does when the crawler navigates to it
#[derive(Debug, Clone)]
enum ScriptedPage {
    Links(Vec<Option<String>>),
    NavigationFails,
    ScrapeFails,
}

// Everything the crawler asked the renderer to do, in call order
#[derive(Debug, Default)]
pub struct RenderLog {
    pub navigations: Vec<String>,
    pub delays: Vec<Duration>,
    pub close_calls: usize,
}

#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    pages: HashMap<String, ScriptedPage>,
    current: Option<String>,
    log: Arc<Mutex<RenderLog>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page whose anchors carry these hrefs ("" stands for a missing href)
    pub fn page(mut self, url: &str, hrefs: &[&str]) -> Self {
        let hrefs = hrefs
            .iter()
            .map(|h| if h.is_empty() { None } else { Some(h.to_string()) })
            .collect();
        self.pages.insert(url.to_string(), ScriptedPage::Links(hrefs));
        self
    }

    /// A page whose anchors carry these exact values, empty strings included
    pub fn raw_page(mut self, url: &str, hrefs: Vec<Option<String>>) -> Self {
        self.pages.insert(url.to_string(), ScriptedPage::Links(hrefs));
        self
    }

    pub fn failing_navigation(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), ScriptedPage::NavigationFails);
        self
    }

    pub fn failing_scrape(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), ScriptedPage::ScrapeFails);
        self
    }

    pub fn log(&self) -> Arc<Mutex<RenderLog>> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    async fn navigate(&mut self, url: &str) -> Result<(), CrawlError> {
        self.log.lock().unwrap().navigations.push(url.to_string());
        self.current = None;

        match self.pages.get(url) {
            None => Err(CrawlError::navigation(url, "unreachable")),
            Some(ScriptedPage::NavigationFails) => Err(CrawlError::navigation(url, "timed out")),
            Some(_) => {
                self.current = Some(url.to_string());
                Ok(())
            }
        }
    }

    // Records the delay instead of sleeping, so tests run instantly
    async fn wait_fixed_delay(&mut self, delay: Duration) {
        self.log.lock().unwrap().delays.push(delay);
    }

    async fn query_anchor_hrefs(&mut self) -> Result<Vec<Option<String>>, CrawlError> {
        let url = self
            .current
            .clone()
            .ok_or_else(|| CrawlError::scrape("about:blank", "no page is loaded"))?;

        match self.pages.get(&url) {
            Some(ScriptedPage::Links(hrefs)) => Ok(hrefs.clone()),
            _ => Err(CrawlError::scrape(&url, "page detached")),
        }
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        self.log.lock().unwrap().close_calls += 1;
        self.current = None;
        Ok(())
    }
}
