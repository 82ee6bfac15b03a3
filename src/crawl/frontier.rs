// src/crawl/frontier.rs
// =============================================================================
// The two URL collections the crawl revolves around.
//
// - visited: pages already rendered, in the order they were rendered
// - pending: pages discovered but not rendered yet, served FIFO
//
// Each side keeps a HashSet next to its ordered collection so membership
// checks are O(1). URLs are compared as exact strings: "/a" and "/a/" are two
// different pages here.
//
// Invariant: a URL is never visited and pending at the same time between two
// crawl steps. next_pending() takes a URL out of pending before the caller
// visits it, and enqueue() refuses visited URLs.
//
// Rust concepts:
// - VecDeque: push_back() to queue, pop_front() to take the oldest
// - into_parts(self): consumes the frontier and moves its data out, no clones
// =============================================================================

use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    visited: Vec<String>,
    visited_set: HashSet<String>,
    pending: VecDeque<String>,
    pending_set: HashSet<String>,
}

impl Frontier {
    /// A frontier whose only pending URL is the crawl's starting point
    pub fn new(base_url: &str) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(base_url);
        frontier
    }

    /// Removes and returns the oldest pending URL
    pub fn next_pending(&mut self) -> Option<String> {
        let url = self.pending.pop_front()?;
        self.pending_set.remove(&url);
        Some(url)
    }

    pub fn mark_visited(&mut self, url: &str) {
        if self.visited_set.insert(url.to_string()) {
            self.visited.push(url.to_string());
        }
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_set.contains(url)
    }

    // Adds a URL to pending. Returns true if it was not already queued.
    // Visited URLs are never queued again.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.is_visited(url) || self.pending_set.contains(url) {
            return false;
        }
        self.pending_set.insert(url.to_string());
        self.pending.push_back(url.to_string());
        true
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Visited URLs in visit order
    #[cfg(test)]
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Pending URLs in the order they will be visited
    #[cfg(test)]
    pub fn pending(&self) -> impl Iterator<Item = &String> {
        self.pending.iter()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.visited, self.pending.into_iter().collect())
    }
}
