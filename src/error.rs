// src/error.rs
// =============================================================================
// Errors that can stop a crawl.
//
// There is no per-page recovery: any of these aborts the whole run. The
// runner in crawl/runner.rs catches the error, closes the renderer and hands
// the error back inside the report.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    /// The renderer could not load a page (unreachable, timeout, redirect
    /// loop, or a response that is not an HTML document)
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Anchor links could not be read from a loaded page
    #[error("could not scrape links from {url}: {reason}")]
    Scrape { url: String, reason: String },

    /// The renderer itself failed: it could not start, or could not shut down
    #[error("renderer failed: {0}")]
    Renderer(String),
}

impl CrawlError {
    pub fn navigation(url: &str, reason: impl ToString) -> Self {
        CrawlError::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn scrape(url: &str, reason: impl ToString) -> Self {
        CrawlError::Scrape {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-friendly name, used in the JSON report
    pub fn kind(&self) -> &'static str {
        match self {
            CrawlError::Navigation { .. } => "navigation",
            CrawlError::Scrape { .. } => "scrape",
            CrawlError::Renderer(_) => "renderer",
        }
    }
}
