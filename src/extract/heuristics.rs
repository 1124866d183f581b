// src/extract/heuristics.rs
// =============================================================================
// Free-text scanning of the raw page body.
//
// These are regular expressions run over the whole document (inline scripts
// included), so they will both miss things and find things that aren't real.
// That's accepted: a false positive costs one 404, a false negative costs one
// missing file.
//
// Three scans:
// - API endpoints: absolute URLs that contain "api"
// - Backend files: URLs or /paths ending in .php .py .js .ts (.html for
//   absolute URLs)
// - Dynamic blobs: `var name = {...};` object literals, logged only
// =============================================================================

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use url::Url;

use super::html::resolve_url;

// Characters that end a URL in free text: whitespace, quotes, backticks and
// tag brackets. Keeping quotes out of the match is what lets the three API
// patterns agree on the same string.
const URL_CHARS: &str = r#"[^\s"'`<>]"#;

/// An inline `var name = {...};` found in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicBlob {
    pub name: String,
    pub literal: String,
}

struct Patterns {
    api_bare: Regex,
    api_quoted: Regex,
    api_assignment: Regex,
    backend_absolute: Regex,
    backend_path: Regex,
    dynamic_var: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: String| Regex::new(&pattern).expect("built-in pattern is valid");
        Patterns {
            api_bare: compile(format!(r"https?://{c}+api{c}*", c = URL_CHARS)),
            api_quoted: compile(format!(r#"["'](https?://{c}+api{c}*)"#, c = URL_CHARS)),
            api_assignment: compile(format!(r#"api\s*=\s*["'](https?://{c}+)"#, c = URL_CHARS)),
            backend_absolute: compile(format!(
                r"https?://[a-zA-Z0-9.-]+(?::\d+)?/{c}*?\.(?:php|py|js|ts|html)\b",
                c = URL_CHARS
            )),
            // The leading group stops this from matching the tail of an
            // absolute URL or the middle of a longer path
            backend_path: compile(
                r"(?:^|[^\w./:-])(/(?:[a-zA-Z0-9._-]+/)*[a-zA-Z0-9._-]+\.(?:php|py|js|ts))\b"
                    .to_string(),
            ),
            dynamic_var: compile(r"var\s+(\w+)\s*=\s*(\{.*?\});".to_string()),
        }
    })
}

/// Absolute URLs that look like API endpoints
///
/// All three patterns run independently and their matches are unioned, so a
/// URL found by more than one of them is still returned once.
pub fn find_api_endpoints(text: &str) -> BTreeSet<Url> {
    let p = patterns();
    let mut found = BTreeSet::new();

    found.extend(p.api_bare.find_iter(text).map(|m| m.as_str()));
    found.extend(
        p.api_quoted
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str()),
    );
    found.extend(
        p.api_assignment
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str()),
    );

    found.into_iter().filter_map(|s| Url::parse(s).ok()).collect()
}

/// URLs that look like server-side source files, resolved against `base`
pub fn find_backend_files(text: &str, base: &Url) -> BTreeSet<Url> {
    let p = patterns();

    let absolute = p.backend_absolute.find_iter(text).map(|m| m.as_str());
    let paths = p
        .backend_path
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str());

    absolute
        .chain(paths)
        .filter_map(|candidate| resolve_url(base, candidate))
        .collect()
}

/// `var name = {...};` object literals, in document order
pub fn find_dynamic_blobs(text: &str) -> Vec<DynamicBlob> {
    patterns()
        .dynamic_var
        .captures_iter(text)
        .map(|c| DynamicBlob {
            name: c[1].to_string(),
            literal: c[2].to_string(),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why OnceLock<Patterns>?
//    - Compiling a Regex is slow compared to running it
//    - OnceLock builds the patterns the first time they're needed and then
//      shares them with every worker thread
//
// 2. Why BTreeSet for the results?
//    - The same URL often shows up several times in one page
//    - A set removes the repeats, and BTreeSet keeps the order stable so
//      logs and tests don't change from run to run
//
// 3. Why no lookbehind in the patterns?
//    - The regex crate doesn't support it (it guarantees linear-time matching)
//    - Instead the allowed URL characters stop at quotes and whitespace
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/blog/post").unwrap()
    }

    fn strings(set: &BTreeSet<Url>) -> Vec<String> {
        set.iter().map(Url::to_string).collect()
    }

    #[test]
    fn test_api_assignment_is_reported_once() {
        let text = r#"<script>api = "http://example.com/api/v1";</script>"#;
        let found = find_api_endpoints(text);
        assert_eq!(strings(&found), vec!["http://example.com/api/v1"]);
    }

    #[test]
    fn test_api_assignment_without_api_in_url() {
        let text = r#"const api = 'https://example.com/v2/graph';"#;
        let found = find_api_endpoints(text);
        assert_eq!(strings(&found), vec!["https://example.com/v2/graph"]);
    }

    #[test]
    fn test_api_bare_url_in_text() {
        let text = "Docs live at https://example.com/rest/api/docs and nowhere else.";
        let found = find_api_endpoints(text);
        assert_eq!(strings(&found), vec!["https://example.com/rest/api/docs"]);
    }

    #[test]
    fn test_api_ignores_urls_without_api() {
        let text = r#"<a href="http://example.com/about">About</a>"#;
        assert!(find_api_endpoints(text).is_empty());
    }

    #[test]
    fn test_api_known_false_positive() {
        // "rapid" contains "api"; the heuristic is allowed to over-match
        let text = "http://example.com/rapid-prototyping";
        assert_eq!(find_api_endpoints(text).len(), 1);
    }

    #[test]
    fn test_backend_absolute_and_path() {
        let text = r#"
            <form action="/cgi/submit.php"></form>
            <script>load("http://example.com/lib/util.ts?v=3")</script>
            fetch('/handler.py')
        "#;
        let found = find_backend_files(text, &base());
        assert_eq!(
            strings(&found),
            vec![
                "http://example.com/cgi/submit.php",
                "http://example.com/handler.py",
                "http://example.com/lib/util.ts",
            ]
        );
    }

    #[test]
    fn test_backend_path_not_taken_from_absolute_url_tail() {
        let text = r#"<script src="https://cdn.other.net/dist/app.js"></script>"#;
        let found = find_backend_files(text, &base());
        assert_eq!(strings(&found), vec!["https://cdn.other.net/dist/app.js"]);
    }

    #[test]
    fn test_backend_skips_lookalike_extensions() {
        let text = r#"fetch("/data/items.json")"#;
        assert!(find_backend_files(text, &base()).is_empty());
    }

    #[test]
    fn test_dynamic_blob() {
        let text = r#"<script>var config = {"a":1};</script>"#;
        let blobs = find_dynamic_blobs(text);
        assert_eq!(
            blobs,
            vec![DynamicBlob {
                name: "config".to_string(),
                literal: r#"{"a":1}"#.to_string(),
            }]
        );
    }

    #[test]
    fn test_dynamic_blob_is_non_greedy() {
        let text = "var a = {x: 1}; var b = {y: 2};";
        let names: Vec<String> = find_dynamic_blobs(text).into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
