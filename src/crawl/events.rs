// src/crawl/events.rs
// =============================================================================
// Things that happen during a crawl, in the order they happen.
//
// The crawler keeps every event in a Vec so the final report can replay the
// whole run, and prints each one as it happens (unless --json is set):
//   Visited: https://site.example/a
//   Found link to visit: https://site.example/b
//
// Rust concepts:
// - Display: the log line format lives next to the type, so println!("{}")
//   and to_string() agree everywhere
// - serde tag/content: turns each variant into a small JSON object
// =============================================================================

use serde::Serialize;
use std::fmt;

// Serializes as {"event": "visited", "url": "..."}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "url", rename_all = "snake_case")]
pub enum CrawlEvent {
    /// A page was loaded and recorded as visited
    Visited(String),
    /// An in-scope link was found and queued
    Discovered(String),
}

// One line per event, the same text the crawler prints while running
impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlEvent::Visited(url) => write!(f, "Visited: {}", url),
            CrawlEvent::Discovered(url) => write!(f, "Found link to visit: {}", url),
        }
    }
}
