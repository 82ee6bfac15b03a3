// src/crawl/report.rs
// =============================================================================
// What a finished (or aborted) crawl hands back to main.
//
// The report is built even when the crawl stopped on an error, so the
// caller still gets every page visited up to that point.
// =============================================================================

use serde::{Serialize, Serializer};

use super::events::CrawlEvent;
use crate::error::CrawlError;

#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub base_url: String,
    pub prefix: String,
    /// Pages in the order they were visited
    pub visited: Vec<String>,
    /// Pages still queued when the crawl stopped (empty unless it aborted)
    pub unvisited: Vec<String>,
    pub events: Vec<CrawlEvent>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<CrawlError>,
}

impl CrawlReport {
    /// True when the crawl ran until nothing was pending
    pub fn completed(&self) -> bool {
        self.error.is_none()
    }
}

// {"kind": "navigation", "message": "navigation to ... failed: ..."}
#[derive(Serialize)]
struct ErrorSummary<'a> {
    kind: &'a str,
    message: String,
}

fn serialize_error<S>(error: &Option<CrawlError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    error
        .as_ref()
        .map(|e| ErrorSummary {
            kind: e.kind(),
            message: e.to_string(),
        })
        .serialize(serializer)
}
