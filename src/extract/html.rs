// src/extract/html.rs
// =============================================================================
// DOM-based extraction: links and assets found through CSS selectors.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Selector rules:
//   a[href]                      -> page link
//   link[rel="stylesheet"][href] -> css asset
//   script[src]                  -> js asset
//   img[src]                     -> image asset
//
// Nothing here filters by domain; that's the caller's job.
// =============================================================================

use crate::target::AssetKind;
use scraper::{Html, Selector};
use url::Url;

/// Links and assets found in one document, already made absolute
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DomLinks {
    pub links: Vec<Url>,
    pub assets: Vec<(AssetKind, Url)>,
}

pub fn extract_dom_links(html: &str, base: &Url) -> DomLinks {
    let document = Html::parse_document(html);

    // These selectors are constants and known to be valid
    let anchors = Selector::parse("a[href]").unwrap();
    let asset_rules = [
        (Selector::parse(r#"link[rel="stylesheet"][href]"#).unwrap(), "href", AssetKind::Css),
        (Selector::parse("script[src]").unwrap(), "src", AssetKind::Js),
        (Selector::parse("img[src]").unwrap(), "src", AssetKind::Image),
    ];

    let links = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(base, href))
        .collect();

    let mut assets = Vec::new();
    for (selector, attr, kind) in &asset_rules {
        for element in document.select(selector) {
            if let Some(url) = element.value().attr(attr).and_then(|v| resolve_url(base, v)) {
                assets.push((*kind, url));
            }
        }
    }

    DomLinks { links, assets }
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "" -> None (an empty attribute points nowhere)
pub(crate) fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/").unwrap()
    }

    #[test]
    fn test_selector_rules() {
        let html = r#"
            <html><head>
              <link rel="stylesheet" href="/s.css">
              <script src="/a.js"></script>
            </head><body>
              <a href="/foo">Foo</a>
              <img src="/i.png">
            </body></html>
        "#;
        let found = extract_dom_links(html, &base());

        assert_eq!(found.links, vec![Url::parse("http://example.com/foo").unwrap()]);
        assert_eq!(
            found.assets,
            vec![
                (AssetKind::Css, Url::parse("http://example.com/s.css").unwrap()),
                (AssetKind::Js, Url::parse("http://example.com/a.js").unwrap()),
                (AssetKind::Image, Url::parse("http://example.com/i.png").unwrap()),
            ]
        );
    }

    #[test]
    fn test_relative_resolution_keeps_query_and_fragment() {
        let page = Url::parse("https://example.com/docs/intro").unwrap();
        let html = r#"<a href="next?page=2#top">Next</a><a href="../about">About</a>"#;
        let found = extract_dom_links(html, &page);

        let links: Vec<String> = found.links.iter().map(Url::to_string).collect();
        assert_eq!(
            links,
            vec!["https://example.com/docs/next?page=2#top", "https://example.com/about"]
        );
    }

    #[test]
    fn test_other_rel_links_are_not_css() {
        let html = r#"<link rel="icon" href="/favicon.ico"><link rel="stylesheet" href="main.css">"#;
        let found = extract_dom_links(html, &base());
        assert_eq!(
            found.assets,
            vec![(AssetKind::Css, Url::parse("http://example.com/main.css").unwrap())]
        );
    }

    #[test]
    fn test_inline_script_has_no_asset() {
        let html = r#"<script>var x = 1;</script><a href="">empty</a>"#;
        let found = extract_dom_links(html, &base());
        assert!(found.assets.is_empty());
        assert!(found.links.is_empty());
    }

    #[test]
    fn test_external_links_are_kept() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a><a href="mailto:a@b.c">Mail</a>"#;
        let found = extract_dom_links(html, &base());
        assert_eq!(found.links.len(), 2);
    }
}
