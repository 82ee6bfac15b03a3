// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// site-walker has a single job, so there are no subcommands: one positional
// base URL plus flags. Every flag can also come from an environment variable
// (SITE_WALKER_*), which is handy in CI.
// =============================================================================

use clap::Parser;

use crate::config::{RendererKind, DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "site-walker",
    version,
    about = "Walk every page of a website that lives under one URL prefix",
    long_about = "site-walker starts at a base URL, loads each page, waits a fixed delay, \
                  and follows every link that starts with the scope prefix until no new \
                  pages are left. It prints each page it visits and a final listing."
)]
pub struct Cli {
    /// URL the crawl starts from (e.g., https://example.com/docs/)
    #[arg(env = "SITE_WALKER_BASE_URL")]
    pub base_url: String,

    /// Only links starting with this text are followed (default: the base URL)
    ///
    /// This is a plain text match, not a domain check.
    #[arg(long, env = "SITE_WALKER_PREFIX")]
    pub prefix: Option<String>,

    /// Milliseconds to wait on each page before reading its links
    #[arg(long, env = "SITE_WALKER_DELAY_MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Seconds before a page load counts as failed
    #[arg(long, env = "SITE_WALKER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// How pages are loaded
    #[arg(long, value_enum, env = "SITE_WALKER_RENDERER", default_value_t = RendererKind::Http)]
    pub renderer: RendererKind,

    /// Show the browser window instead of running headless (browser renderer only)
    #[arg(long)]
    pub headed: bool,

    /// Print the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
