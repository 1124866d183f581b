// src/config.rs
// =============================================================================
// Crawl settings.
//
// Values are layered:
// 1. Built-in defaults (CrawlConfig::default)
// 2. An optional JSON file given with --config
// 3. Command-line flags, which win over both
//
// Every field has a serde default, so a config file only needs the keys it
// wants to change.
// =============================================================================

use crate::error::CrawlError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_URLS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Start URL; must be absolute with a host
    pub seed: Option<String>,
    /// Mirror root; each host gets a sub-directory
    pub output_dir: PathBuf,
    /// Maximum fetches in flight at once (also the worker count)
    pub concurrency: usize,
    /// Minimum gap between two request starts, across all workers
    pub request_delay_ms: u64,
    /// Per-request network timeout
    pub request_timeout_secs: u64,
    /// Page hops to follow from the seed (None = unlimited)
    pub max_depth: Option<usize>,
    /// Total URLs the frontier will ever admit (None = unlimited)
    pub max_urls: Option<usize>,
    /// Also accept hosts ending in ".<seed host>"
    pub include_subdomains: bool,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: None,
            output_dir: PathBuf::from("output"),
            concurrency: DEFAULT_CONCURRENCY,
            request_delay_ms: DEFAULT_DELAY_MS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_depth: None,
            max_urls: Some(DEFAULT_MAX_URLS),
            include_subdomains: false,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    /// Reads a JSON config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self, CrawlError> {
        let text = std::fs::read_to_string(path).map_err(|e| CrawlError::Config {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| CrawlError::Config {
            path: Some(path.to_path_buf()),
            reason: e.to_string(),
        })
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rejects settings that would make the crawl do nothing or hang
    pub fn validate(&self) -> Result<(), CrawlError> {
        let invalid = |reason: &str| CrawlError::Config {
            path: None,
            reason: reason.to_string(),
        };

        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1"));
        }
        if self.max_urls == Some(0) {
            return Err(invalid("max_urls must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_scraper_settings() {
        let config = CrawlConfig::default();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.request_delay(), Duration::from_millis(500));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(!config.include_subdomains);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"concurrency": 8, "max_depth": 3}}"#).unwrap();

        let config = CrawlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.request_delay_ms, DEFAULT_DELAY_MS);
        assert_eq!(config.max_urls, Some(DEFAULT_MAX_URLS));
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = CrawlConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CrawlError::Config { path: Some(_), .. }));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = CrawlConfig {
            concurrency: 0,
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CrawlConfig {
            max_urls: Some(0),
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
