// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a base URL (FIFO queue)
// - Links are followed only if they start with the configured prefix
// - A fixed pause on every page before its links are read
// - The first error stops the crawl; the renderer is closed regardless
//
// Submodules:
// - frontier: visited + pending URL collections
// - scope: the prefix rule for discovered links
// - events: the Visited / Discovered log
// - runner: the loop itself and crawl_site()
// - report: what a crawl returns
// =============================================================================

mod events;
mod frontier;
mod report;
mod runner;
mod scope;

// Re-export the pieces main needs
pub use report::CrawlReport;
pub use runner::crawl_site;
