// src/fetch/mod.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};
use url::Url;

/// The source document could not be made available locally. Distinct from
/// malformed content: nothing can be extracted without the file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not download {url} ({reason}) and no local copy at {}", dest.display())]
    Unavailable {
        url: String,
        dest: PathBuf,
        reason: String,
    },
    #[error("document not found: {} (enable downloads or pass an existing file)", dest.display())]
    Missing { dest: PathBuf },
}

/// Download `url` and save it at `dest`, creating parent directories.
pub async fn download_document(client: &Client, url: &str, dest: impl AsRef<Path>) -> Result<()> {
    let dest = dest.as_ref();
    let url = Url::parse(url).with_context(|| format!("parsing URL {}", url))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let resp = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?;
    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading body from {}", url))?;
    fs::write(dest, &bytes)
        .await
        .with_context(|| format!("writing {}", dest.display()))?;
    Ok(())
}

/// Make sure the document is on disk at `dest` and return its path.
///
/// With downloads enabled, a fresh copy is fetched; if that fails an
/// existing local copy is used instead. With downloads disabled the local
/// copy must already exist.
#[tracing::instrument(level = "info", skip(client, dest), fields(path = %dest.as_ref().display()))]
pub async fn ensure_document(
    client: &Client,
    url: &str,
    dest: impl AsRef<Path>,
    allow_download: bool,
) -> Result<PathBuf, FetchError> {
    let dest = dest.as_ref().to_path_buf();

    if !allow_download {
        if dest.is_file() {
            return Ok(dest);
        }
        return Err(FetchError::Missing { dest });
    }

    match download_document(client, url, &dest).await {
        Ok(()) => {
            info!(url, "downloaded");
            Ok(dest)
        }
        Err(err) if dest.is_file() => {
            warn!(url, error = %format!("{:#}", err), "download failed; using local copy");
            Ok(dest)
        }
        Err(err) => Err(FetchError::Unavailable {
            url: url.to_string(),
            dest,
            reason: format!("{:#}", err),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_no_download_requires_local_copy() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("esami.pdf");
        let client = Client::new();

        let err = ensure_document(&client, "https://example.invalid/esami.pdf", &dest, false)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Missing { .. }));

        std::fs::write(&dest, b"%PDF-1.4").unwrap();
        let path = ensure_document(&client, "https://example.invalid/esami.pdf", &dest, false)
            .await
            .unwrap();
        assert_eq!(path, dest);
    }

    #[tokio::test]
    async fn test_failed_download_falls_back_to_local_copy() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("esami.pdf");
        std::fs::write(&dest, b"%PDF-1.4 local").unwrap();

        // an unparsable URL fails before any network access
        let path = ensure_document(&Client::new(), "not a url", &dest, true)
            .await
            .unwrap();
        assert_eq!(path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.4 local");
    }

    #[tokio::test]
    async fn test_failed_download_without_local_copy() {
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("missing.pdf");

        let err = ensure_document(&Client::new(), "not a url", &dest, true)
            .await
            .unwrap_err();
        match err {
            FetchError::Unavailable { url, dest: d, .. } => {
                assert_eq!(url, "not a url");
                assert_eq!(d, dest);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
