// src/target.rs
// =============================================================================
// A CrawlTarget is a discovered URL plus what kind of resource we think it is.
//
// The kind decides two things:
// - whether the response gets parsed for more links (only pages)
// - where and how the body is saved (see mirror::saved_path)
// =============================================================================

use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Css,
    Js,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// An HTML page reached through an <a href>
    Page,
    /// A stylesheet, script or image referenced by a page
    Asset(AssetKind),
    /// A URL that looks like an API endpoint in the page text
    ApiEndpoint,
    /// A URL that looks like server-side source (.php, .py, ...)
    BackendFile,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Page => write!(f, "page"),
            TargetKind::Asset(AssetKind::Css) => write!(f, "css"),
            TargetKind::Asset(AssetKind::Js) => write!(f, "js"),
            TargetKind::Asset(AssetKind::Image) => write!(f, "image"),
            TargetKind::ApiEndpoint => write!(f, "api"),
            TargetKind::BackendFile => write!(f, "backend"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    pub kind: TargetKind,
    /// Page hops from the seed (the seed itself is 0)
    pub depth: usize,
}

impl CrawlTarget {
    pub fn new(url: Url, kind: TargetKind, depth: usize) -> Self {
        Self { url, kind, depth }
    }

    pub fn seed(url: Url) -> Self {
        Self::new(url, TargetKind::Page, 0)
    }
}
