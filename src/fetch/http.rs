// src/fetch/http.rs
// =============================================================================
// The Fetcher: downloads one URL at a time per caller, but never more than
// `concurrency` at once across the whole crawl.
//
// Key behaviour:
// - GET only; redirects are NOT followed, a 3xx comes back with its Location
//   so the caller can decide (scope, visited set) whether to go there
// - Status code is always filled in
// - The body is only downloaded for 2xx responses
// - Network errors (timeout, DNS, TLS...) come back as CrawlError::Network
// - No retries: a failed URL is simply dropped by the caller
// =============================================================================

use super::pacing::Pacer;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use reqwest::header::{HeaderName, CONTENT_TYPE, LOCATION};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;
use url::Url;

/// What came back from a single GET
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The URL that was requested
    pub url: Url,
    pub status: u16,
    /// Empty unless the status was 2xx
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    /// Where a 3xx points, resolved against `url`
    pub location: Option<Url>,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx result into an error, like reqwest's error_for_status
    pub fn error_for_status(self) -> Result<Self, CrawlError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CrawlError::NonSuccessStatus {
                url: self.url.to_string(),
                status: self.status,
            })
        }
    }

    /// True when the response should be parsed as a web page
    ///
    /// A missing content-type is treated as HTML.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => {
                let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
                mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml"
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    permits: Arc<Semaphore>,
    pacer: Arc<Pacer>,
}

impl Fetcher {
    /// Builds the shared HTTP client from the crawl settings
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.concurrency.max(1))),
            pacer: Arc::new(Pacer::new(config.request_delay())),
        })
    }

    /// GETs `url`, waiting for a free slot and for the pacing delay first
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult, CrawlError> {
        let network = |source: reqwest::Error| CrawlError::Network {
            url: url.to_string(),
            source,
        };

        let _permit = self
            .permits
            .acquire()
            .await
            .expect("fetch semaphore is never closed");
        self.pacer.wait().await;

        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await.map_err(network)?;

        let status = response.status();
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        let content_type = header(CONTENT_TYPE);

        // A relative Location ("/en/") is relative to the URL we asked for
        let location = if status.is_redirection() {
            header(LOCATION).and_then(|loc| url.join(&loc).ok())
        } else {
            None
        };

        let body = if status.is_success() {
            response.bytes().await.map_err(network)?.to_vec()
        } else {
            Vec::new()
        };

        Ok(FetchResult {
            url: url.clone(),
            status: status.as_u16(),
            body,
            content_type,
            location,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why clone the Fetcher?
//    - reqwest::Client is a handle around a shared connection pool
//    - The semaphore and pacer sit behind Arc, so every clone shares them
//    - Cloning is cheap: it only bumps reference counts
//
// 2. What does `let _permit = ...` do?
//    - Holds one of the semaphore's slots until the end of fetch()
//    - When _permit is dropped the slot goes back to the pool
//    - Note: `let _ = ...` would drop it immediately, hence the name
//
// 3. Why Policy::none() for redirects?
//    - reqwest would happily follow a redirect to any other host
//    - By the time we saw the final URL, the off-site GET already happened
//    - Returning the 3xx lets the crawl loop treat Location as a new link
// -----------------------------------------------------------------------------
