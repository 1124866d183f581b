// src/scope.rs
// =============================================================================
// The domain filter.
//
// A DomainScope is built once from the seed URL and then passed by reference
// to everything that needs to know "is this URL ours?".
//
// Matching rules:
// - Only http and https URLs are ever in scope
// - Exact mode: the URL's host must equal the seed's host
// - Subdomain mode: the host may also end with "." + the seed's host
//
// Substring matching ("example.com" appears somewhere in the URL) is NOT used:
// it would let in hosts like notexample.com or example.com.evil.net.
// =============================================================================

use crate::error::CrawlError;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    host: String,
    netloc: String,
    include_subdomains: bool,
}

impl DomainScope {
    /// Derives the scope from the seed URL
    ///
    /// Fails if the seed is not an absolute http(s) URL with a host.
    pub fn from_seed(seed: &str, include_subdomains: bool) -> Result<(Self, Url), CrawlError> {
        let fatal = |reason: String| CrawlError::FatalSeed {
            url: seed.to_string(),
            reason,
        };

        let url = Url::parse(seed.trim()).map_err(|e| fatal(e.to_string()))?;

        if !is_http(&url) {
            return Err(fatal(format!("unsupported scheme '{}'", url.scheme())));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| fatal("URL has no host".to_string()))?
            .to_ascii_lowercase();

        let scope = DomainScope {
            netloc: netloc(&url).unwrap_or_else(|| host.clone()),
            host,
            include_subdomains,
        };
        Ok((scope, url))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// host[:port] of the seed, as used for the mirror folder name
    pub fn netloc(&self) -> &str {
        &self.netloc
    }

    /// True iff the crawler is allowed to fetch this URL
    pub fn in_scope(&self, url: &Url) -> bool {
        if !is_http(url) {
            return false;
        }

        let host = match url.host_str() {
            Some(h) => h.to_ascii_lowercase(),
            None => return false,
        };

        if host == self.host {
            return true;
        }

        self.include_subdomains
            && host
                .strip_suffix(self.host.as_str())
                .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1)
    }

    /// Mirror folder for a URL: its own netloc when in scope, else the seed's
    pub fn folder_for(&self, url: &Url) -> String {
        if self.in_scope(url) {
            netloc(url).unwrap_or_else(|| self.netloc.clone())
        } else {
            self.netloc.clone()
        }
    }
}

fn is_http(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

/// host plus the port when it is not the scheme's default
fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(seed: &str, subdomains: bool) -> DomainScope {
        DomainScope::from_seed(seed, subdomains).unwrap().0
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_seed_without_host_is_fatal() {
        let err = DomainScope::from_seed("not a url", false).unwrap_err();
        assert!(matches!(err, CrawlError::FatalSeed { .. }));

        let err = DomainScope::from_seed("mailto:someone@example.com", false).unwrap_err();
        assert!(matches!(err, CrawlError::FatalSeed { .. }));

        let err = DomainScope::from_seed("file:///etc/passwd", false).unwrap_err();
        assert!(matches!(err, CrawlError::FatalSeed { .. }));
    }

    #[test]
    fn test_exact_host_match() {
        let s = scope("http://example.com/start", false);
        assert_eq!(s.host(), "example.com");
        assert!(s.in_scope(&url("http://example.com/a")));
        assert!(s.in_scope(&url("https://EXAMPLE.com/b?q=1")));
        assert!(!s.in_scope(&url("http://blog.example.com/")));
    }

    #[test]
    fn test_lookalike_hosts_rejected() {
        let s = scope("http://example.com/", true);
        assert!(!s.in_scope(&url("http://notexample.com/")));
        assert!(!s.in_scope(&url("http://example.com.evil.net/")));
        assert!(!s.in_scope(&url("http://evil.net/?next=example.com")));
    }

    #[test]
    fn test_subdomain_mode() {
        let s = scope("https://example.com", true);
        assert!(s.in_scope(&url("https://blog.example.com/post")));
        assert!(s.in_scope(&url("https://a.b.example.com/")));
        assert!(s.in_scope(&url("https://example.com/")));
    }

    #[test]
    fn test_non_http_schemes_out_of_scope() {
        let s = scope("http://example.com/", false);
        assert!(!s.in_scope(&url("mailto:info@example.com")));
        assert!(!s.in_scope(&url("javascript:void(0)")));
        assert!(!s.in_scope(&url("ftp://example.com/file")));
    }

    #[test]
    fn test_netloc_keeps_explicit_port() {
        let s = scope("http://127.0.0.1:8080/", false);
        assert_eq!(s.netloc(), "127.0.0.1:8080");
        assert!(s.in_scope(&url("http://127.0.0.1:9090/other-port")));

        let s = scope("https://example.com:443/", false);
        assert_eq!(s.netloc(), "example.com");
    }

    #[test]
    fn test_folder_for_subdomain() {
        let s = scope("http://example.com/", true);
        assert_eq!(s.folder_for(&url("http://blog.example.com/x")), "blog.example.com");
        assert_eq!(s.folder_for(&url("http://example.com/x")), "example.com");
    }
}
