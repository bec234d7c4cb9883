//! Makes sure the lyrics corpus exists locally before a run.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::PipelineError;

const DRIVE_FILE_PREFIX: &str = "https://drive.google.com/file/d/";

/// Returns `local_path` once it is guaranteed to exist, downloading it from
/// `download_url` first if needed. An existing file is never re-fetched.
pub async fn ensure_input_file(
    local_path: &Path,
    download_url: Option<&str>,
) -> Result<PathBuf, PipelineError> {
    if local_path.exists() {
        info!("Input file {} exists; skipping download", local_path.display());
        return Ok(local_path.to_path_buf());
    }

    let url = download_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| PipelineError::MissingInput(local_path.to_path_buf()))?;

    if let Some(parent) = local_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PipelineError::io(parent, e))?;
    }

    let url = direct_download_url(url);
    info!("Downloading input file from {url}");

    let fetch_err = |source| PipelineError::Fetch {
        url: url.clone(),
        source,
    };
    let response = reqwest::get(&url).await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::FetchStatus {
            url: url.clone(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await.map_err(fetch_err)?;

    tokio::fs::write(local_path, &body)
        .await
        .map_err(|e| PipelineError::io(local_path, e))?;
    info!("Saved {} bytes to {}", body.len(), local_path.display());

    Ok(local_path.to_path_buf())
}

/// Rewrites a Google Drive share link (`/file/d/<id>/view...`) into its direct
/// download form. Any other URL is returned unchanged.
pub fn direct_download_url(url: &str) -> String {
    url.strip_prefix(DRIVE_FILE_PREFIX)
        .and_then(|rest| rest.split(['/', '?']).next())
        .filter(|id| !id.is_empty())
        .map(|id| format!("https://drive.google.com/uc?export=download&id={id}"))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_drive_share_link_rewritten() {
        let url = "https://drive.google.com/file/d/1PqADJhbqqTgyEAXKltgPe6Q0x_zQGLqA/view?usp=drive_link";
        assert_eq!(
            direct_download_url(url),
            "https://drive.google.com/uc?export=download&id=1PqADJhbqqTgyEAXKltgPe6Q0x_zQGLqA"
        );
    }

    #[test]
    fn test_other_urls_unchanged() {
        let url = "https://example.com/lyrics.txt";
        assert_eq!(direct_download_url(url), url);
        assert_eq!(
            direct_download_url("https://drive.google.com/file/d/"),
            "https://drive.google.com/file/d/"
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_not_fetched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");
        std::fs::write(&path, "{}\n").unwrap();

        // An unroutable URL proves no request is made.
        let got = ensure_input_file(&path, Some("http://127.0.0.1:9/never"))
            .await
            .unwrap();
        assert_eq!(got, path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[tokio::test]
    async fn test_missing_file_without_url_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");

        let err = ensure_input_file(&path, None).await.unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput(_)));

        let err = ensure_input_file(&path, Some("  ")).await.unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput(_)));
    }

    #[tokio::test]
    async fn test_downloads_into_nested_directory() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/corpus.txt")
            .with_status(200)
            .with_body("{\"lyrics\":\"x\"}\n")
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("cleaned_lyrics.txt");
        let url = format!("{}/corpus.txt", server.url());

        let got = ensure_input_file(&path, Some(&url)).await.unwrap();
        assert_eq!(got, path);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"lyrics\":\"x\"}\n"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_status_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/corpus.txt")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("cleaned_lyrics.txt");
        let url = format!("{}/corpus.txt", server.url());

        let err = ensure_input_file(&path, Some(&url)).await.unwrap_err();
        assert!(matches!(err, PipelineError::FetchStatus { status: 404, .. }));
        assert!(!path.exists());
    }
}
