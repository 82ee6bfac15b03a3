// src/config.rs
// =============================================================================
// Resolved crawl settings.
//
// The CLI (src/cli.rs) collects raw values; CrawlConfig::new validates them
// once so the crawler and the renderers can trust what they get:
// - the base URL must parse and be http/https
// - the scope prefix defaults to the base URL when not given
// =============================================================================

use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

/// Default pause on every page before its links are read
pub const DEFAULT_DELAY_MS: u64 = 5000;

/// Default navigation timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which page renderer backs the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RendererKind {
    /// Fetch pages over HTTP and parse the HTML
    Http,
    /// Drive a Chromium instance (needs the `browser` cargo feature)
    Browser,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub base_url: String,
    /// Links are followed only if they start with this string
    pub prefix: String,
    pub delay: Duration,
    pub timeout: Duration,
    pub renderer: RendererKind,
    pub headless: bool,
    /// Print "Visited:" / "Found link to visit:" lines while crawling
    pub echo_events: bool,
}

impl CrawlConfig {
    pub fn new(base_url: &str, prefix: Option<&str>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| anyhow!("Invalid URL '{}': {}", base_url, e))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(anyhow!(
                "Unsupported URL scheme '{}' in {} (expected http or https)",
                parsed.scheme(),
                base_url
            ));
        }

        // The base URL is kept exactly as typed: URLs are compared as plain
        // strings, so parsing must not rewrite it (e.g. add a trailing slash)
        let prefix = match prefix {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => base_url.to_string(),
        };

        Ok(Self {
            base_url: base_url.to_string(),
            prefix,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            renderer: RendererKind::Http,
            headless: true,
            echo_events: true,
        })
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_renderer(mut self, renderer: RendererKind, headless: bool) -> Self {
        self.renderer = renderer;
        self.headless = headless;
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_events = echo;
        self
    }
}
