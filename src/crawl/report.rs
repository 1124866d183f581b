// src/crawl/report.rs
// =============================================================================
// Counters for a crawl run.
//
// Workers bump CrawlStats (atomics, no lock needed); when the run is over the
// counters are copied into a plain CrawlReport that can be printed as a table
// or serialized to JSON.
// =============================================================================

use crate::target::TargetKind;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CrawlStats {
    fetched: AtomicUsize,
    saved_pages: AtomicUsize,
    saved_assets: AtomicUsize,
    saved_api: AtomicUsize,
    saved_backend: AtomicUsize,
    non_success: AtomicUsize,
    network_errors: AtomicUsize,
    io_errors: AtomicUsize,
    out_of_scope: AtomicUsize,
    duplicates: AtomicUsize,
    limit_skipped: AtomicUsize,
    redirects: AtomicUsize,
    dynamic_blobs: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl CrawlStats {
    pub fn record_fetched(&self) {
        bump(&self.fetched);
    }

    /// Counts a save under the bucket for how the file was stored
    pub fn record_saved(&self, stored_as: TargetKind) {
        match stored_as {
            TargetKind::Page => bump(&self.saved_pages),
            TargetKind::Asset(_) => bump(&self.saved_assets),
            TargetKind::ApiEndpoint => bump(&self.saved_api),
            TargetKind::BackendFile => bump(&self.saved_backend),
        }
    }

    pub fn record_non_success(&self) {
        bump(&self.non_success);
    }

    pub fn record_network_error(&self) {
        bump(&self.network_errors);
    }

    pub fn record_io_error(&self) {
        bump(&self.io_errors);
    }

    pub fn record_out_of_scope(&self) {
        bump(&self.out_of_scope);
    }

    pub fn record_duplicate(&self) {
        bump(&self.duplicates);
    }

    pub fn record_limit_skipped(&self) {
        bump(&self.limit_skipped);
    }

    pub fn record_redirect(&self) {
        bump(&self.redirects);
    }

    pub fn record_dynamic_blobs(&self, count: usize) {
        self.dynamic_blobs.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self, seed: &str, cancelled: bool) -> CrawlReport {
        let get = |c: &AtomicUsize| c.load(Ordering::Relaxed);
        CrawlReport {
            seed: seed.to_string(),
            fetched: get(&self.fetched),
            saved_pages: get(&self.saved_pages),
            saved_assets: get(&self.saved_assets),
            saved_api: get(&self.saved_api),
            saved_backend: get(&self.saved_backend),
            non_success: get(&self.non_success),
            network_errors: get(&self.network_errors),
            io_errors: get(&self.io_errors),
            out_of_scope: get(&self.out_of_scope),
            duplicates: get(&self.duplicates),
            limit_skipped: get(&self.limit_skipped),
            redirects: get(&self.redirects),
            dynamic_blobs: get(&self.dynamic_blobs),
            cancelled,
        }
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    /// Requests that got any HTTP response
    pub fetched: usize,
    pub saved_pages: usize,
    pub saved_assets: usize,
    pub saved_api: usize,
    pub saved_backend: usize,
    /// Responses outside 2xx (nothing saved)
    pub non_success: usize,
    /// Requests that failed before a response
    pub network_errors: usize,
    /// Saves that failed on disk
    pub io_errors: usize,
    /// Discovered URLs dropped by the domain filter
    pub out_of_scope: usize,
    /// Discovered URLs that were already known
    pub duplicates: usize,
    /// Discovered URLs dropped because max_urls was reached
    pub limit_skipped: usize,
    /// 3xx responses whose Location was offered as a new URL
    pub redirects: usize,
    pub dynamic_blobs: usize,
    pub cancelled: bool,
}

impl CrawlReport {
    pub fn saved_total(&self) -> usize {
        self.saved_pages + self.saved_assets + self.saved_api + self.saved_backend
    }

    pub fn failed_total(&self) -> usize {
        self.non_success + self.network_errors + self.io_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::AssetKind;

    #[test]
    fn test_saves_are_bucketed_by_kind() {
        let stats = CrawlStats::default();
        stats.record_saved(TargetKind::Page);
        stats.record_saved(TargetKind::Asset(AssetKind::Css));
        stats.record_saved(TargetKind::Asset(AssetKind::Image));
        stats.record_saved(TargetKind::BackendFile);
        stats.record_non_success();
        stats.record_io_error();

        let report = stats.snapshot("http://example.com/", false);
        assert_eq!(report.saved_pages, 1);
        assert_eq!(report.saved_assets, 2);
        assert_eq!(report.saved_backend, 1);
        assert_eq!(report.saved_total(), 4);
        assert_eq!(report.failed_total(), 2);
    }

    #[test]
    fn test_report_json_field_names() {
        let report = CrawlReport {
            seed: "http://example.com/".to_string(),
            saved_pages: 3,
            ..CrawlReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "http://example.com/");
        assert_eq!(json["saved_pages"], 3);
        assert_eq!(json["cancelled"], false);
    }
}
