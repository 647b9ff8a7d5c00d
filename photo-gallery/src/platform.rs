//! Capabilities the gallery consumes from its host.
//!
//! The host supplies a camera, a filesystem, a key-value store and (for
//! browser runtimes) a way to turn a web path into a data URL. All calls are
//! awaited on a single logical thread, so the futures are not required to be
//! `Send`.

use crate::data_url::DataUrl;
use crate::models::{CameraOptions, CameraPhoto, Directory};
use async_trait::async_trait;

/// Error reported by a host capability
#[derive(Debug)]
pub enum PlatformError {
    /// The user dismissed the camera or picker
    Cancelled(String),
    PermissionDenied(String),
    NotFound(String),
    Io(std::io::Error),
    /// The capability does not exist on this platform
    Unavailable(String),
    Other(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PlatformError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PlatformError::NotFound(msg) => write!(f, "Not found: {}", msg),
            PlatformError::Io(e) => write!(f, "IO error: {}", e),
            PlatformError::Unavailable(msg) => write!(f, "Not available: {}", msg),
            PlatformError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            PlatformError::NotFound(err.to_string())
        } else {
            PlatformError::Io(err)
        }
    }
}

#[async_trait(?Send)]
pub trait Camera {
    async fn get_photo(&self, options: &CameraOptions) -> Result<CameraPhoto, PlatformError>;
}

#[async_trait(?Send)]
pub trait Filesystem {
    /// Reads a file and returns its content base64 encoded.
    ///
    /// `directory` is ignored for `file://` URIs and absolute paths.
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError>;

    /// Writes base64 `data` and returns a durable URI for the new file
    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError>;
}

#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PlatformError>;
}

/// Fetches a (possibly transient) web path and reads it as a data URL
#[async_trait(?Send)]
pub trait BlobFetcher {
    async fn fetch_data_url(&self, web_path: &str) -> Result<DataUrl, PlatformError>;
}
