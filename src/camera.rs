// Camera selection for the app. The device camera comes from photo-gallery's
// picker bridge; an existing image file can stand in for it on any platform.

use async_trait::async_trait;
use photo_gallery::{
    AndroidCameraConfig, Camera, CameraOptions, CameraPhoto, DeviceCamera, PlatformError,
};
use std::path::PathBuf;

/// "Takes" a photo by pointing at an image that already exists on disk
#[derive(Debug, Clone)]
pub struct FileCamera {
    source: PathBuf,
}

impl FileCamera {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[async_trait(?Send)]
impl Camera for FileCamera {
    async fn get_photo(&self, _options: &CameraOptions) -> Result<CameraPhoto, PlatformError> {
        let absolute = self.source.canonicalize()?;
        if !absolute.is_file() {
            return Err(PlatformError::NotFound(format!(
                "{} is not a file",
                absolute.display()
            )));
        }

        let path = absolute.to_string_lossy().to_string();
        let format = absolute
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_else(|| "jpeg".to_string());

        Ok(CameraPhoto {
            web_path: Some(format!("file://{}", path)),
            path: Some(path),
            format,
        })
    }
}

/// Picks the camera for this run: an explicit file wins over the device camera
pub fn platform_camera(source: Option<PathBuf>, local_file_prefix: &str) -> Box<dyn Camera> {
    match source {
        Some(path) => {
            log::debug!("Using {:?} as camera source", path);
            Box::new(FileCamera::new(path))
        }
        None => Box::new(DeviceCamera::new(
            AndroidCameraConfig::default(),
            local_file_prefix,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_camera_reports_paths() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("Shot.JPG");
        std::fs::write(&image, [0xff, 0xd8]).unwrap();

        let photo = FileCamera::new(&image)
            .get_photo(&CameraOptions::default())
            .await
            .unwrap();
        let path = photo.path.unwrap();
        assert!(path.ends_with("Shot.JPG"));
        assert_eq!(photo.web_path, Some(format!("file://{}", path)));
        assert_eq!(photo.format, "jpg");
    }

    #[tokio::test]
    async fn test_file_camera_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileCamera::new(dir.path().join("missing.jpeg"))
            .get_photo(&CameraOptions::default())
            .await;
        assert!(matches!(result, Err(PlatformError::NotFound(_))));
    }
}
