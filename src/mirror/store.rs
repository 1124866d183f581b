// src/mirror/store.rs
// =============================================================================
// Writes one resource to disk.
//
// create_dir_all is used for parents because several workers may create the
// same directory at the same moment; it succeeds if the directory exists.
// =============================================================================

use super::path::saved_path;
use crate::error::CrawlError;
use crate::scope::DomainScope;
use crate::target::TargetKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// Saves `body` for `url` and returns the path written
pub async fn save(
    output_dir: &Path,
    scope: &DomainScope,
    url: &Url,
    body: &[u8],
    kind: TargetKind,
) -> Result<PathBuf, CrawlError> {
    let io_error = |path: PathBuf, source| CrawlError::Io {
        url: url.to_string(),
        path,
        source,
    };

    let path = saved_path(output_dir, scope, url, kind)
        .map_err(|e| io_error(output_dir.join(scope.folder_for(url)), e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent.to_path_buf(), e))?;
    }

    fs::write(&path, body)
        .await
        .map_err(|e| io_error(path.clone(), e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::AssetKind;
    use tempfile::TempDir;

    fn scope() -> DomainScope {
        DomainScope::from_seed("http://example.com/", false).unwrap().0
    }

    #[tokio::test]
    async fn test_save_creates_parents() {
        let dir = TempDir::new().unwrap();
        let url = Url::parse("http://example.com/static/css/site.css").unwrap();

        let path = save(dir.path(), &scope(), &url, b"body{}", TargetKind::Asset(AssetKind::Css))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("example.com/static/css/site.css"));
        assert_eq!(std::fs::read(&path).unwrap(), b"body{}");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let url = Url::parse("http://example.com/blog").unwrap();

        save(dir.path(), &scope(), &url, b"first", TargetKind::Page).await.unwrap();
        let path = save(dir.path(), &scope(), &url, b"second", TargetKind::Page)
            .await
            .unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_concurrent_saves_share_parent() {
        let dir = TempDir::new().unwrap();
        let scope = scope();

        let saves = (0..8).map(|i| {
            let url = Url::parse(&format!("http://example.com/img/{}.png", i)).unwrap();
            let output = dir.path().to_path_buf();
            let scope = scope.clone();
            tokio::spawn(async move {
                save(&output, &scope, &url, b"png", TargetKind::Asset(AssetKind::Image)).await
            })
        });

        for handle in futures::future::join_all(saves).await {
            assert!(handle.unwrap().is_ok());
        }
        assert_eq!(std::fs::read_dir(dir.path().join("example.com/img")).unwrap().count(), 8);
    }

    #[tokio::test]
    async fn test_unwritable_target_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A file where the host directory should be
        std::fs::write(dir.path().join("example.com"), b"in the way").unwrap();
        let url = Url::parse("http://example.com/a.js").unwrap();

        let err = save(dir.path(), &scope(), &url, b"js", TargetKind::Asset(AssetKind::Js))
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Io { .. }));
    }
}
