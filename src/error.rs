// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// FatalSeed, Client and Config stop a run before any request is made.
// Network, NonSuccessStatus and Io belong to a single URL: the worker logs
// them, counts them in the report and moves on.
//
// Rust concepts:
// - thiserror: derive Display and Error for an enum instead of writing them
// - #[source]: keeps the underlying error so `{:#}` / anyhow can show the chain
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be used to start a crawl
    #[error("invalid seed URL '{url}': {reason}")]
    FatalSeed { url: String, reason: String },

    /// The request never produced a response (DNS, connect, timeout, TLS...)
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered outside the 2xx range
    #[error("{url} returned HTTP {status}")]
    NonSuccessStatus { url: String, status: u16 },

    /// Writing the mirrored file failed
    #[error("failed to save {url} to {}: {source}", path.display())]
    Io {
        url: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The shared HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The config file or flag combination is unusable
    #[error("invalid configuration{}: {reason}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Config {
        path: Option<PathBuf>,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let status = CrawlError::NonSuccessStatus {
            url: "http://example.com/missing".to_string(),
            status: 404,
        };
        assert_eq!(status.to_string(), "http://example.com/missing returned HTTP 404");
    }

    #[test]
    fn test_config_message_mentions_path() {
        let err = CrawlError::Config {
            path: Some(PathBuf::from("mirror.json")),
            reason: "concurrency must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration in mirror.json: concurrency must be at least 1"
        );

        let err = CrawlError::Config {
            path: None,
            reason: "max_urls must be at least 1".to_string(),
        };
        assert_eq!(err.to_string(), "invalid configuration: max_urls must be at least 1");
    }

    #[test]
    fn test_io_message_mentions_path() {
        let err = CrawlError::Io {
            url: "http://example.com/a.css".to_string(),
            path: PathBuf::from("output/example.com/a.css"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to save http://example.com/a.css to output/example.com/a.css: denied"
        );
    }
}
