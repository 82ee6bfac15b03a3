// src/crawl/runner.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Pending starts with the base URL, visited starts empty
// 2. Take the oldest pending URL out of pending
// 3. Load it; record it as visited
// 4. Wait the fixed delay, then read every anchor's href
// 5. Queue each href that is non-empty, in scope and not visited yet
// 6. Repeat until pending is empty
//
// Any navigation or scrape error stops the whole crawl: no retry, no
// skipping ahead. crawl_site() owns the renderer and closes it whether the
// loop finished or not.
// =============================================================================

use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::events::CrawlEvent;
use super::frontier::Frontier;
use super::report::CrawlReport;
use super::scope::ScopeFilter;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::render::PageRenderer;

pub struct Crawler<'r> {
    renderer: &'r mut dyn PageRenderer,
    scope: ScopeFilter,
    delay: Duration,
    echo_events: bool,
    frontier: Frontier,
    events: Vec<CrawlEvent>,
}

impl<'r> Crawler<'r> {
    pub fn new(config: &CrawlConfig, renderer: &'r mut dyn PageRenderer) -> Self {
        Self {
            renderer,
            scope: ScopeFilter::new(&config.prefix),
            delay: config.delay,
            echo_events: config.echo_events,
            frontier: Frontier::new(&config.base_url),
            events: Vec::new(),
        }
    }

    /// Visits pages until nothing is pending, or until the first error
    pub async fn run(&mut self) -> Result<(), CrawlError> {
        while self.frontier.has_pending() {
            self.step().await?;
        }
        Ok(())
    }

    // One loop iteration. Returns Ok(false) when there was nothing to visit.
    pub async fn step(&mut self) -> Result<bool, CrawlError> {
        let Some(current) = self.frontier.next_pending() else {
            return Ok(false);
        };

        self.visit(&current).await?;
        Ok(true)
    }

    async fn visit(&mut self, current: &str) -> Result<(), CrawlError> {
        self.renderer.navigate(current).await?;

        self.frontier.mark_visited(current);
        self.record(CrawlEvent::Visited(current.to_string()));

        self.renderer.wait_fixed_delay(self.delay).await;

        let hrefs = self.renderer.query_anchor_hrefs().await?;
        debug!(url = current, anchors = hrefs.len(), "anchors read");

        for href in hrefs {
            if !self.scope.accepts(href.as_deref()) {
                continue;
            }
            // accepts() only passes non-empty hrefs
            let Some(href) = href else { continue };

            if self.frontier.is_visited(&href) {
                continue;
            }

            let newly_queued = self.frontier.enqueue(&href);
            debug!(url = %href, newly_queued, "in-scope link");
            self.record(CrawlEvent::Discovered(href));
        }

        Ok(())
    }

    fn record(&mut self, event: CrawlEvent) {
        if self.echo_events {
            println!("{}", event);
        }
        self.events.push(event);
    }

    #[cfg(test)]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// (visited, still pending, events)
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, Vec<CrawlEvent>) {
        let (visited, pending) = self.frontier.into_parts();
        (visited, pending, self.events)
    }
}

// Runs a whole crawl with the given renderer, then closes the renderer.
//
// The renderer is closed on every path. A crawl error ends up in the
// report; a failure to close is only logged.
pub async fn crawl_site(config: &CrawlConfig, mut renderer: Box<dyn PageRenderer>) -> CrawlReport {
    info!(base_url = %config.base_url, prefix = %config.prefix, "crawl started");

    let (result, visited, pending, events) = {
        let mut crawler = Crawler::new(config, &mut *renderer);
        let result = crawler.run().await;
        let (visited, pending, events) = crawler.into_parts();
        (result, visited, pending, events)
    };

    match &result {
        Ok(()) => info!(pages = visited.len(), "crawl finished"),
        Err(e) => error!(pages = visited.len(), "crawl aborted: {}", e),
    }

    if let Err(e) = renderer.close().await {
        warn!("failed to close renderer: {}", e);
    }

    CrawlReport {
        base_url: config.base_url.clone(),
        prefix: config.prefix.clone(),
        visited,
        unvisited: pending,
        events,
        error: result.err(),
    }
}
