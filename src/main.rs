// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up diagnostics logging (stderr)
// 3. Start the selected page renderer
// 4. Crawl, print the report
// 5. Exit with proper code (0 = crawl finished, 1 = crawl aborted, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated crawl settings
mod crawl;         // src/crawl/ - the crawl loop
mod error;         // src/error.rs - errors that stop a crawl
mod render;        // src/render/ - page renderers (HTTP, browser)

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::CrawlConfig;
use crawl::CrawlReport;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Bad arguments, renderer that would not start, broken stdout...
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(code);
}

// Returns Ok(exit code) once a crawl ran (see exit_code), or Err when
// nothing could be crawled at all
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CrawlConfig::new(&cli.base_url, cli.prefix.as_deref())?
        .with_delay_ms(cli.delay_ms)
        .with_timeout_secs(cli.timeout_secs)
        .with_renderer(cli.renderer, !cli.headed)
        // In JSON mode stdout carries nothing but the report
        .with_echo(!cli.json);

    if !cli.json {
        println!("🔍 Crawling: {}", config.base_url);
        println!("🎯 Scope prefix: {}", config.prefix);
    }

    let renderer = render::launch(&config)
        .await
        .context("Could not start the page renderer")?;

    let report = crawl::crawl_site(&config, renderer).await;

    print_report(&mut io::stdout(), &mut io::stderr(), &report, cli.json)?;

    Ok(exit_code(&report))
}

// RUST_LOG wins when set; otherwise warnings only, or debug with --verbose
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (only possible in tests) is harmless, so ignore the error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// Maps a crawl outcome to the process exit code
//   0 = every reachable in-scope page was visited
//   1 = the crawl stopped on an error
fn exit_code(report: &CrawlReport) -> i32 {
    if report.completed() {
        0
    } else {
        1
    }
}

// Prints the report either as text or JSON
//
// The visited listing is printed even when the crawl aborted: it shows how
// far the crawl got before the error. The error line goes to `err` (stderr
// in the real program) so the listing on `out` stays clean.
fn print_report(
    out: &mut impl Write,
    err: &mut impl Write,
    report: &CrawlReport,
    json: bool,
) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        writeln!(out, "{}", json_output)?;
        return Ok(());
    }

    writeln!(out, "\nVisited pages:")?;
    for url in &report.visited {
        writeln!(out, "{}", url)?;
    }

    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   📄 Visited: {}", report.visited.len())?;

    if let Some(error) = &report.error {
        writeln!(out, "   ⏳ Left in queue: {}", report.unvisited.len())?;
        writeln!(err, "❌ Crawl aborted: {}", error)?;
    } else {
        writeln!(out, "   ✅ Crawl finished")?;
    }

    Ok(())
}
