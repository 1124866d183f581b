// src/extract/mod.rs
// =============================================================================
// This module turns a fetched HTML page into the URLs it points at.
//
// Submodules:
// - html: DOM selectors (links, stylesheets, scripts, images)
// - heuristics: regex scans of the raw text (API endpoints, backend files,
//   inline JS objects)
//
// extract() is a pure function: same page in, same URLs out. It knows nothing
// about the crawl's domain; the crawl engine filters afterwards.
// =============================================================================

mod heuristics;
mod html;

pub use heuristics::DynamicBlob;

use crate::target::{AssetKind, CrawlTarget, TargetKind};
use std::collections::BTreeSet;
use url::Url;

/// Everything discovered on one page
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extraction {
    pub links: Vec<Url>,
    pub assets: Vec<(AssetKind, Url)>,
    pub api_endpoints: BTreeSet<Url>,
    pub backend_files: BTreeSet<Url>,
    pub dynamic_blobs: Vec<DynamicBlob>,
}

pub fn extract(page_url: &Url, html: &str) -> Extraction {
    let dom = html::extract_dom_links(html, page_url);

    Extraction {
        links: dom.links,
        assets: dom.assets,
        api_endpoints: heuristics::find_api_endpoints(html),
        backend_files: heuristics::find_backend_files(html, page_url),
        dynamic_blobs: heuristics::find_dynamic_blobs(html),
    }
}

impl Extraction {
    /// Tags every discovered URL with its kind
    ///
    /// Links become pages one hop deeper than `page_depth`, unless
    /// `follow_links` is false (depth limit reached). Everything else is a
    /// leaf resource of this page and keeps its depth.
    pub fn into_targets(self, page_depth: usize, follow_links: bool) -> Vec<CrawlTarget> {
        let mut targets = Vec::new();

        if follow_links {
            targets.extend(
                self.links
                    .into_iter()
                    .map(|url| CrawlTarget::new(url, TargetKind::Page, page_depth + 1)),
            );
        }
        targets.extend(
            self.assets
                .into_iter()
                .map(|(kind, url)| CrawlTarget::new(url, TargetKind::Asset(kind), page_depth)),
        );
        targets.extend(
            self.api_endpoints
                .into_iter()
                .map(|url| CrawlTarget::new(url, TargetKind::ApiEndpoint, page_depth)),
        );
        targets.extend(
            self.backend_files
                .into_iter()
                .map(|url| CrawlTarget::new(url, TargetKind::BackendFile, page_depth)),
        );

        targets
    }
}
