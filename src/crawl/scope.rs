// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links belong to the crawl.
//
// The rule is a plain textual prefix match, nothing domain-aware:
// with prefix "https://site.example", "https://site.example.evil/" passes.
// Pick a prefix ending in "/" to pin the crawl to one host.
//
// Examples (prefix = "https://site.example/docs"):
//   "https://site.example/docs/intro" -> followed
//   "https://site.example/docs-old"   -> followed (text match only)
//   "https://site.example/blog"       -> skipped
//   ""                                -> skipped
//
// Rust concepts:
// - Option<&str>: renderers report anchors without an href as None, so the
//   filter takes the same shape and rejects it in one match
// - match guards: `Some(h) if !h.is_empty()` folds the empty check in
// =============================================================================

// Holds the prefix; built once per crawl from CrawlConfig::prefix
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    prefix: String,
}

impl ScopeFilter {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// True for a non-empty href that starts with the prefix
    pub fn accepts(&self, href: Option<&str>) -> bool {
        match href {
            Some(h) if !h.is_empty() => h.starts_with(&self.prefix),
            _ => false,
        }
    }
}
