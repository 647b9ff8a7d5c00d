//! Runtime specific storage of captured images.
//!
//! Native runtimes copy the camera's temporary file into the private data
//! directory and rebuild display URIs from disk on every load. Browser
//! runtimes persist a base64 copy through the same filesystem capability but
//! keep rendering the session blob URI the camera handed out.

use crate::data_url::DataUrl;
use crate::models::{CameraPhoto, Directory, Photo, PhotoGalleryConfig, RuntimeKind};
use crate::platform::{BlobFetcher, Filesystem};
use crate::service::PhotoGalleryError;
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait StorageBackend {
    fn kind(&self) -> RuntimeKind;

    /// Reads the stored bytes of a photo as a data URL
    async fn read_photo(&self, photo: &Photo) -> Result<DataUrl, PhotoGalleryError>;

    /// Persists a camera result under `filename` and builds its manifest entry
    async fn write_capture(
        &self,
        captured: &CameraPhoto,
        filename: &str,
    ) -> Result<Photo, PhotoGalleryError>;

    /// Fills in `display_path` for a photo loaded from the manifest
    async fn hydrate(&self, photo: Photo) -> Result<Photo, PhotoGalleryError>;
}

/// Picks the backend for the detected runtime. Called once at startup.
pub fn select_backend(
    kind: RuntimeKind,
    filesystem: Box<dyn Filesystem>,
    fetcher: Box<dyn BlobFetcher>,
    config: &PhotoGalleryConfig,
) -> Box<dyn StorageBackend> {
    log::debug!("Selecting {:?} storage backend", kind);
    match kind {
        RuntimeKind::Native => Box::new(NativeStorageBackend::new(filesystem, config)),
        RuntimeKind::Browser => Box::new(BrowserStorageBackend::new(filesystem, fetcher, config)),
    }
}

/// Maps a local file URI to the form the native web view can load
pub fn convert_file_src(uri: &str, local_file_prefix: &str) -> String {
    let prefix = local_file_prefix.trim_end_matches('/');
    if let Some(path) = uri.strip_prefix("file://") {
        format!("{}{}", prefix, path)
    } else if uri.starts_with('/') {
        format!("{}{}", prefix, uri)
    } else {
        uri.to_string()
    }
}

pub struct NativeStorageBackend {
    filesystem: Box<dyn Filesystem>,
    directory: Directory,
    display_mime: String,
    local_file_prefix: String,
}

impl NativeStorageBackend {
    pub fn new(filesystem: Box<dyn Filesystem>, config: &PhotoGalleryConfig) -> Self {
        Self {
            filesystem,
            directory: config.data_directory,
            display_mime: config.display_mime.clone(),
            local_file_prefix: config.local_file_prefix.clone(),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for NativeStorageBackend {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Native
    }

    async fn read_photo(&self, photo: &Photo) -> Result<DataUrl, PhotoGalleryError> {
        let data = self
            .filesystem
            .read_file(&photo.filepath, Some(self.directory))
            .await?;
        Ok(DataUrl::new(self.display_mime.clone(), data))
    }

    async fn write_capture(
        &self,
        captured: &CameraPhoto,
        filename: &str,
    ) -> Result<Photo, PhotoGalleryError> {
        let source = captured.path.as_deref().ok_or_else(|| {
            PhotoGalleryError::MissingCameraResult("camera returned no file path".to_string())
        })?;

        log::debug!("Copying camera file {} to {}", source, filename);
        let data = self.filesystem.read_file(source, None).await?;
        let uri = self
            .filesystem
            .write_file(filename, &data, Some(self.directory))
            .await?;

        let display_path = convert_file_src(&uri, &self.local_file_prefix);
        Ok(Photo::new(uri).with_display_path(display_path))
    }

    async fn hydrate(&self, mut photo: Photo) -> Result<Photo, PhotoGalleryError> {
        let data_url = self.read_photo(&photo).await?;
        photo.display_path = Some(data_url.to_string());
        Ok(photo)
    }
}

pub struct BrowserStorageBackend {
    filesystem: Box<dyn Filesystem>,
    fetcher: Box<dyn BlobFetcher>,
    directory: Directory,
    display_mime: String,
}

impl BrowserStorageBackend {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        fetcher: Box<dyn BlobFetcher>,
        config: &PhotoGalleryConfig,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            directory: config.data_directory,
            display_mime: config.display_mime.clone(),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for BrowserStorageBackend {
    fn kind(&self) -> RuntimeKind {
        RuntimeKind::Browser
    }

    async fn read_photo(&self, photo: &Photo) -> Result<DataUrl, PhotoGalleryError> {
        let data = self
            .filesystem
            .read_file(&photo.filepath, Some(self.directory))
            .await?;
        Ok(DataUrl::new(self.display_mime.clone(), data))
    }

    async fn write_capture(
        &self,
        captured: &CameraPhoto,
        filename: &str,
    ) -> Result<Photo, PhotoGalleryError> {
        let web_path = captured.web_path.as_deref().ok_or_else(|| {
            PhotoGalleryError::MissingCameraResult("camera returned no web path".to_string())
        })?;

        let data_url = self.fetcher.fetch_data_url(web_path).await?;
        log::debug!(
            "Storing {} bytes of base64 ({}) as {}",
            data_url.data.len(),
            data_url.mime,
            filename
        );
        self.filesystem
            .write_file(filename, &data_url.data, Some(self.directory))
            .await?;

        Ok(Photo::new(filename).with_display_path(web_path))
    }

    // Blob URIs cannot be re-derived, the stored one is trusted for the session
    async fn hydrate(&self, photo: Photo) -> Result<Photo, PhotoGalleryError> {
        Ok(photo)
    }
}
