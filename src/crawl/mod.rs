// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent crawling with a fixed pool of workers
// - Every URL is fetched at most once (the frontier's visited set)
// - Same-domain restriction (see scope.rs)
// - Optional depth and URL-count limits
// - Clean stop on cancellation (Ctrl-C)
//
// Submodules:
// - frontier: the queue + visited set state machine
// - engine: the workers and the fetch -> save -> extract loop
// - report: counters collected during the run
// =============================================================================

mod engine;
mod frontier;
mod report;

// Re-export the main crawling function and its result
pub use engine::mirror_site;
pub use report::CrawlReport;
