// src/fetch/mod.rs
// =============================================================================
// This module downloads URLs for the crawler.
//
// Submodules:
// - http: the Fetcher itself (reqwest client + concurrency limit)
// - pacing: the global "wait between requests" throttle
//
// Rust concepts:
// - Semaphore: caps how many requests run at the same time
// - tokio::time: async sleeping that doesn't block other tasks
// =============================================================================

mod http;
mod pacing;

pub use http::{FetchResult, Fetcher};
