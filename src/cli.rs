// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every crawl setting is an Option here: None means "not given on the command
// line", so the value from --config (or the built-in default) is kept.
// =============================================================================

use crate::config::CrawlConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version,
    about = "Mirror every page and asset of a single website to disk",
    long_about = "site-mirror crawls a website starting from one URL, stays on that site's domain, \
                  and saves pages, stylesheets, scripts, images, and anything that looks like an \
                  API endpoint or backend source file under output/<host>/."
)]
pub struct Cli {
    /// Start URL (e.g., https://example.com). Prompted for when omitted.
    pub url: Option<String>,

    /// Directory the mirror is written to (default: output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum requests in flight at once (default: 4)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Minimum delay between two requests, in milliseconds (default: 500)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Link hops to follow from the start page (0 = only the start page)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop admitting new URLs after this many (default: 10000)
    #[arg(long)]
    pub max_urls: Option<usize>,

    /// Also crawl subdomains of the start URL's host
    #[arg(long)]
    pub include_subdomains: bool,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// JSON file with crawl settings; flags given here win over it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the final report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log every queued URL and request
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies the flags that were actually given on top of `config`
    pub fn apply_to(&self, mut config: CrawlConfig) -> CrawlConfig {
        if let Some(url) = &self.url {
            config.seed = Some(url.clone());
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = usize::from(concurrency);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = Some(max_depth);
        }
        if let Some(max_urls) = self.max_urls {
            config.max_urls = Some(max_urls);
        }
        if self.include_subdomains {
            config.include_subdomains = true;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }
}
