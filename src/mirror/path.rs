// src/mirror/path.rs
// =============================================================================
// Maps a URL to the file it is saved as.
//
// Rules:
// - Root is <output_dir>/<netloc>/
// - Pages: path with slashes trimmed, "" -> "index.html", ".html" appended
//   when missing
// - Everything else: path with slashes trimmed, used as-is
//
// Known collisions (last write wins, nothing is renamed):
// - a page at /a and a page at /a.html
// - URLs that differ only in their query string
// =============================================================================

use crate::scope::DomainScope;
use crate::target::TargetKind;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Where `url` of the given kind lands inside the mirror
///
/// Fails with InvalidInput for a non-page URL with an empty path, which would
/// otherwise point at the host directory itself.
pub fn saved_path(
    output_dir: &Path,
    scope: &DomainScope,
    url: &Url,
    kind: TargetKind,
) -> io::Result<PathBuf> {
    let trimmed = url.path().trim_matches('/');

    let relative = match kind {
        TargetKind::Page => {
            let name = if trimmed.is_empty() { "index.html" } else { trimmed };
            if name.ends_with(".html") {
                name.to_string()
            } else {
                format!("{}.html", name)
            }
        }
        TargetKind::Asset(_) | TargetKind::ApiEndpoint | TargetKind::BackendFile => {
            if trimmed.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no path to save {} content under", url, kind),
                ));
            }
            trimmed.to_string()
        }
    };

    let mut path = output_dir.join(scope.folder_for(url));
    // Push segment by segment so the result uses the platform separator
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    Ok(path)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return io::Result and not CrawlError?
//    - This function doesn't touch the disk, but its only failure is an
//      "invalid path" kind of problem, which io::ErrorKind already names
//    - store::save wraps it into CrawlError::Io together with the URL
//
// 2. Why push segments instead of joining the string?
//    - PathBuf::push uses the right separator on every platform
//    - Filtering empty segments also folds "a//b" into "a/b"
//
// 3. Why url.path() and not the whole URL?
//    - The query (?page=2) and fragment (#top) are not part of the file name
//    - That's also why two URLs can map to the same file
// -----------------------------------------------------------------------------
