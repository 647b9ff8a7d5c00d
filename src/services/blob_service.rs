use async_trait::async_trait;
use photo_gallery::{guess_mime_from_path, BlobFetcher, DataUrl, PlatformError};
use reqwest::header::CONTENT_TYPE;

/// Resolves camera web paths to data URLs.
///
/// Handles base64 `data:` URLs in place (other data URLs are rejected), `http(s)` through reqwest and `file://` or
/// plain paths from disk. Browser `blob:` URLs cannot be resolved outside the
/// page that created them.
#[derive(Debug, Clone, Default)]
pub struct HttpBlobFetcher {
    client: reqwest::Client,
}

impl HttpBlobFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch_http(&self, url: &str) -> Result<DataUrl, PlatformError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PlatformError::Other(format!("Fetching {} failed: {}", url, e)))?;

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| guess_mime_from_path(url).to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlatformError::Other(format!("Reading {} failed: {}", url, e)))?;

        log::debug!("Fetched {} bytes ({}) from {}", bytes.len(), mime, url);
        Ok(DataUrl::from_bytes(mime, &bytes))
    }
}

#[async_trait(?Send)]
impl BlobFetcher for HttpBlobFetcher {
    async fn fetch_data_url(&self, web_path: &str) -> Result<DataUrl, PlatformError> {
        if let Some(data_url) = DataUrl::parse(web_path) {
            return Ok(data_url);
        }
        if web_path.starts_with("data:") {
            return Err(PlatformError::Other(format!(
                "Unsupported data URL, expected base64 payload: {}",
                web_path.chars().take(32).collect::<String>()
            )));
        }
        if web_path.starts_with("http://") || web_path.starts_with("https://") {
            return self.fetch_http(web_path).await;
        }
        if web_path.starts_with("blob:") {
            return Err(PlatformError::Unavailable(format!(
                "{} only resolves inside the browser that created it",
                web_path
            )));
        }

        let path = web_path.strip_prefix("file://").unwrap_or(web_path);
        let bytes = std::fs::read(path)?;
        Ok(DataUrl::from_bytes(guess_mime_from_path(path), &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file_uri() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("shot.png");
        std::fs::write(&image, [0, 0, 0]).unwrap();

        let url = HttpBlobFetcher::new()
            .fetch_data_url(&format!("file://{}", image.to_string_lossy()))
            .await
            .unwrap();
        assert_eq!(url.to_string(), "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_data_url_passes_through() {
        let url = HttpBlobFetcher::new()
            .fetch_data_url("data:image/jpeg;base64,AAAA")
            .await
            .unwrap();
        assert_eq!(url, DataUrl::new("image/jpeg", "AAAA"));
    }

    #[tokio::test]
    async fn test_blob_url_is_unavailable() {
        let result = HttpBlobFetcher::new().fetch_data_url("blob:xyz").await;
        assert!(matches!(result, Err(PlatformError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_plain_data_url_is_rejected() {
        let result = HttpBlobFetcher::new()
            .fetch_data_url("data:text/plain,hello")
            .await;
        assert!(matches!(result, Err(PlatformError::Other(_))));
    }
}
