// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the crawl config (defaults <- --config file <- flags)
// 3. Run the crawl, with Ctrl-C wired to a clean stop
// 4. Print the summary and exit with a proper code
//    (0 = everything saved, 1 = some URLs failed, 2 = fatal error)
// =============================================================================

mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - crawl settings
mod crawl;      // src/crawl/ - frontier and workers
mod error;      // src/error.rs - CrawlError
mod extract;    // src/extract/ - finding URLs in pages
mod fetch;      // src/fetch/ - HTTP with concurrency limit and pacing
mod logging;    // src/logging.rs - tracing subscriber
mod mirror;     // src/mirror/ - URL -> file path, writing files
mod scope;      // src/scope.rs - domain filter
mod target;     // src/target.rs - CrawlTarget and its kinds

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::CrawlConfig;
use crawl::CrawlReport;
use std::io::{self, BufRead, Write};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = crawl finished, nothing failed
//   Ok(1) = crawl finished, some URLs failed (non-2xx, network, disk)
//   Err   = fatal error (bad seed, bad config, client setup)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let base = match &cli.config {
        Some(path) => CrawlConfig::from_file(path)?,
        None => CrawlConfig::default(),
    };
    let mut config = cli.apply_to(base);

    if config.seed.is_none() {
        config.seed = Some(prompt_for_url().context("could not read the start URL")?);
    }

    // Ctrl-C stops new work; in-flight requests finish and are saved
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing in-flight requests");
                cancel.cancel();
            }
        });
    }

    let report = crawl::mirror_site(&config, cancel)
        .await
        .context("crawl aborted")?;

    print_report(&report, cli.json)?;

    if report.failed_total() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Asks for the start URL on stdin when none was given
fn prompt_for_url() -> Result<String> {
    print!("Enter the URL to scrape: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &CrawlReport) {
    println!("{:<28} {:>10}", "RESULT", "COUNT");
    println!("{}", "=".repeat(39));

    let rows = [
        ("Fetched", report.fetched),
        ("Saved pages", report.saved_pages),
        ("Saved assets", report.saved_assets),
        ("Saved API responses", report.saved_api),
        ("Saved backend files", report.saved_backend),
        ("Non-success status", report.non_success),
        ("Network errors", report.network_errors),
        ("Save errors", report.io_errors),
        ("Out of scope (skipped)", report.out_of_scope),
        ("Over URL limit (skipped)", report.limit_skipped),
        ("Redirects", report.redirects),
        ("Dynamic content blobs", report.dynamic_blobs),
    ];
    for (label, count) in rows {
        println!("{:<28} {:>10}", label, count);
    }

    println!();
    println!("📊 Summary for {}:", report.seed);
    println!("   ✅ Saved: {}", report.saved_total());
    println!("   ❌ Failed: {}", report.failed_total());
    if report.cancelled {
        println!("   ⏹️  Stopped early (interrupted)");
    }
}
