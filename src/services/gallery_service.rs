use crate::config::{AppConfig, RuntimeMode};
use crate::database::{init_database, SqliteKeyValueStore};
use crate::error::AppError;
use crate::filesystem::{get_app_data_dir, DiskFilesystem};
use crate::services::blob_service::HttpBlobFetcher;
use photo_gallery::{select_backend, Camera, PhotoGalleryService, RuntimeKind};
use std::path::PathBuf;

/// Resolves the configured runtime mode for this build target
pub fn detect_runtime(mode: RuntimeMode) -> RuntimeKind {
    match mode {
        RuntimeMode::Native => RuntimeKind::Native,
        RuntimeMode::Browser => RuntimeKind::Browser,
        RuntimeMode::Auto => RuntimeKind::from_native_flag(cfg!(target_os = "android")),
    }
}

pub fn data_root(config: &AppConfig) -> PathBuf {
    config.data_dir.clone().unwrap_or_else(get_app_data_dir)
}

/// Wires the SQLite store, disk filesystem and fetcher into a gallery service.
///
/// The returned service is not initialized yet.
pub fn open_gallery(
    config: &AppConfig,
    camera: Box<dyn Camera>,
) -> Result<PhotoGalleryService, AppError> {
    let root = data_root(config);
    let conn = init_database(&root.join(&config.database_file))?;

    let gallery_config = config.gallery_config();
    let kind = detect_runtime(config.runtime);
    log::info!("Opening photo gallery in {:?} ({:?} runtime)", root, kind);

    let backend = select_backend(
        kind,
        Box::new(DiskFilesystem::new(&root)),
        Box::new(HttpBlobFetcher::new()),
        &gallery_config,
    );

    Ok(PhotoGalleryService::new(
        gallery_config,
        backend,
        camera,
        Box::new(SqliteKeyValueStore::new(conn)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FileCamera;

    fn config_in(root: &std::path::Path, runtime: RuntimeMode) -> AppConfig {
        AppConfig {
            data_dir: Some(root.to_path_buf()),
            runtime,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_detect_runtime() {
        assert_eq!(detect_runtime(RuntimeMode::Native), RuntimeKind::Native);
        assert_eq!(detect_runtime(RuntimeMode::Browser), RuntimeKind::Browser);
        #[cfg(not(target_os = "android"))]
        assert_eq!(detect_runtime(RuntimeMode::Auto), RuntimeKind::Browser);
    }

    #[tokio::test]
    async fn test_native_capture_survives_restart() {
        let root = tempfile::tempdir().unwrap();
        let image = root.path().join("camera.jpeg");
        std::fs::write(&image, [0, 0, 0]).unwrap();
        let config = config_in(root.path(), RuntimeMode::Native);

        let mut gallery = open_gallery(&config, Box::new(FileCamera::new(&image))).unwrap();
        gallery.initialize().await.unwrap();
        let photo = gallery.capture().await.unwrap();
        assert!(photo.filepath.starts_with("file://"));
        assert!(photo.filepath.ends_with(".jpeg"));
        drop(gallery);

        let mut reopened = open_gallery(&config, Box::new(FileCamera::new(&image))).unwrap();
        reopened.initialize().await.unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.photos()[0].filepath, photo.filepath);
        assert_eq!(
            reopened.photos()[0].display_path.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
    }

    #[tokio::test]
    async fn test_browser_capture_keeps_web_path() {
        let root = tempfile::tempdir().unwrap();
        let image = root.path().join("camera.jpeg");
        std::fs::write(&image, [0, 0, 0]).unwrap();
        let config = config_in(root.path(), RuntimeMode::Browser);

        let mut gallery = open_gallery(&config, Box::new(FileCamera::new(&image))).unwrap();
        gallery.initialize().await.unwrap();
        let photo = gallery.capture().await.unwrap();

        let web_path = format!("file://{}", image.canonicalize().unwrap().to_string_lossy());
        assert_eq!(photo.display_path, Some(web_path));
        assert!(!photo.filepath.contains('/'));
        assert!(root.path().join("photos").join(&photo.filepath).exists());

        let mut reopened = open_gallery(&config, Box::new(FileCamera::new(&image))).unwrap();
        reopened.initialize().await.unwrap();
        assert_eq!(reopened.photos(), gallery.photos());
    }
}
