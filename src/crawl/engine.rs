// src/crawl/engine.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Build the domain scope from the seed (a bad seed stops everything here)
// 2. Put the seed in the frontier as a page
// 3. Start `concurrency` workers; each one repeats:
//      take a target -> fetch -> save -> (pages only) extract + admit links
//    A 3xx is not saved: its Location goes back through offer() like any
//    other discovered link, so the domain filter and the visited set decide
//    whether it is ever requested
// 4. When the frontier says there is no more work, every worker returns and
//    the counters are turned into a CrawlReport
//
// Failures only affect their own URL:
// - network error      -> warning, URL dropped
// - non-2xx status     -> warning, URL dropped, nothing saved or parsed
// - save failed        -> warning, crawl goes on
// =============================================================================

use super::frontier::{Admission, Frontier};
use super::report::{CrawlReport, CrawlStats};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::extract;
use crate::fetch::{FetchResult, Fetcher};
use crate::mirror;
use crate::scope::DomainScope;
use crate::target::{CrawlTarget, TargetKind};
use futures::future::join_all;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

/// Shared state every worker reads from
struct Crawler {
    scope: DomainScope,
    fetcher: Fetcher,
    frontier: Frontier,
    stats: CrawlStats,
    output_dir: PathBuf,
    max_depth: Option<usize>,
}

/// Mirrors the site behind `config.seed` into `config.output_dir`
///
/// Returns once every reachable in-scope URL has been processed, or once
/// `cancel` fires and the workers have finished their current URL.
pub async fn mirror_site(
    config: &CrawlConfig,
    cancel: CancellationToken,
) -> Result<CrawlReport, CrawlError> {
    config.validate()?;

    let seed = config.seed.as_deref().ok_or_else(|| CrawlError::FatalSeed {
        url: String::new(),
        reason: "no seed URL given".to_string(),
    })?;
    let (scope, seed_url) = DomainScope::from_seed(seed, config.include_subdomains)?;

    let crawler = Arc::new(Crawler {
        fetcher: Fetcher::new(config)?,
        frontier: Frontier::new(config.max_urls, cancel.clone()),
        stats: CrawlStats::default(),
        output_dir: config.output_dir.clone(),
        max_depth: config.max_depth,
        scope,
    });

    info!(
        "Mirroring {} into {} ({} workers, {} ms between requests)",
        seed_url,
        config.output_dir.join(crawler.scope.netloc()).display(),
        config.concurrency,
        config.request_delay_ms
    );
    crawler.frontier.admit(CrawlTarget::seed(seed_url.clone())).await;

    let workers = (0..config.concurrency).map(|id| {
        let crawler = Arc::clone(&crawler);
        tokio::spawn(async move { crawler.run_worker(id).await })
    });
    for joined in join_all(workers).await {
        if let Err(e) = joined {
            error!("crawl worker stopped unexpectedly: {}", e);
        }
    }

    let report = crawler
        .stats
        .snapshot(seed_url.as_str(), cancel.is_cancelled());
    info!(
        "Finished {}: {} URLs admitted, {} fetched, {} saved, {} failed",
        seed_url,
        crawler.frontier.admitted().await,
        report.fetched,
        report.saved_total(),
        report.failed_total()
    );
    Ok(report)
}

impl Crawler {
    async fn run_worker(&self, id: usize) {
        debug!(worker = id, "worker started");

        while let Some(target) = self.frontier.next().await {
            let url = target.url.clone();

            // A panic while handling one URL must still release its slot,
            // otherwise the other workers would wait forever
            if AssertUnwindSafe(self.process(target))
                .catch_unwind()
                .await
                .is_err()
            {
                error!("worker {} panicked while processing {}", id, url);
            }
            self.frontier.complete().await;
        }

        debug!(worker = id, "worker finished");
    }

    async fn process(&self, target: CrawlTarget) {
        let fetched = match self.fetcher.fetch(&target.url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("{}", e);
                self.stats.record_network_error();
                return;
            }
        };
        self.stats.record_fetched();

        if let Some(location) = fetched.location.clone() {
            debug!("{} redirects to {}", target.url, location);
            self.stats.record_redirect();
            // Same kind and depth: a redirect is not an extra hop
            self.offer(CrawlTarget::new(location, target.kind, target.depth))
                .await;
            return;
        }

        let fetched = match fetched.error_for_status() {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Failed to scrape: {}", e);
                self.stats.record_non_success();
                return;
            }
        };

        match target.kind {
            TargetKind::Page => self.handle_page(&target, &fetched).await,
            kind => self.store(&fetched.url, &fetched.body, kind).await,
        }
    }

    async fn handle_page(&self, target: &CrawlTarget, fetched: &FetchResult) {
        info!("Currently scraping: {}", fetched.url);
        self.store(&fetched.url, &fetched.body, TargetKind::Page).await;

        if !fetched.is_html() {
            debug!(
                "{} is {}, not parsing for links",
                fetched.url,
                fetched.content_type.as_deref().unwrap_or("unknown")
            );
            return;
        }

        let html = String::from_utf8_lossy(&fetched.body);
        let extraction = extract(&fetched.url, &html);

        for blob in &extraction.dynamic_blobs {
            info!("Dynamic content found: {} = {}", blob.name, blob.literal);
        }
        self.stats.record_dynamic_blobs(extraction.dynamic_blobs.len());

        let follow_links = self.max_depth.map_or(true, |max| target.depth < max);
        for discovered in extraction.into_targets(target.depth, follow_links) {
            self.offer(discovered).await;
        }
    }

    /// Filters a discovered target by domain and hands it to the frontier
    async fn offer(&self, target: CrawlTarget) {
        if !self.scope.in_scope(&target.url) {
            debug!("skipping {} (outside {})", target.url, self.scope.host());
            self.stats.record_out_of_scope();
            return;
        }

        let url = target.url.clone();
        let kind = target.kind;
        match self.frontier.admit(target).await {
            Admission::Queued => debug!("queued {} ({})", url, kind),
            Admission::Duplicate => self.stats.record_duplicate(),
            Admission::LimitReached => {
                debug!("URL limit reached, dropping {}", url);
                self.stats.record_limit_skipped();
            }
            Admission::Cancelled => {}
        }
    }

    async fn store(&self, url: &Url, body: &[u8], kind: TargetKind) {
        // The kind picks the path rules (page.html vs. verbatim) and the
        // counter the save lands in
        match mirror::save(&self.output_dir, &self.scope, url, body, kind).await {
            Ok(path) => {
                let label = match kind {
                    TargetKind::Page => "page".to_string(),
                    TargetKind::Asset(_) => format!("asset ({})", kind),
                    TargetKind::ApiEndpoint => "API response".to_string(),
                    TargetKind::BackendFile => "backend file".to_string(),
                };
                info!("Saved {}: {}", label, path.display());
                self.stats.record_saved(kind);
            }
            Err(e) => {
                warn!("{}", e);
                self.stats.record_io_error();
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<Crawler>?
//    - tokio::spawn needs a 'static future, so each worker can't borrow it
//    - Arc gives every worker its own handle to the same shared state
//    - Nothing in Crawler needs &mut: the frontier locks internally and
//      the counters are atomics
//
// 2. What does catch_unwind do here?
//    - A panic inside process() would normally kill the whole task
//    - That task would then never call complete(), and the frontier would
//      think a URL is still in flight forever
//    - AssertUnwindSafe is needed because &self isn't UnwindSafe by default
//
// 3. Why are errors logged and not returned?
//    - One broken URL must not stop the crawl
//    - Only a bad seed (before any worker starts) is returned as an Err
// -----------------------------------------------------------------------------
