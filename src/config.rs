use crate::error::AppError;
use photo_gallery::PhotoGalleryConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "photo-snap.toml";

/// Which storage strategy the gallery should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeMode {
    /// Native on Android, browser-style everywhere else
    #[default]
    Auto,
    Native,
    Browser,
}

/// Settings read from `photo-snap.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform app data directory
    pub data_dir: Option<PathBuf>,
    /// SQLite file (relative to the data directory) holding the key-value store
    pub database_file: String,
    pub manifest_key: String,
    pub runtime: RuntimeMode,
    pub local_file_prefix: String,
    pub surface_persist_errors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gallery = PhotoGalleryConfig::default();
        Self {
            data_dir: None,
            database_file: "photo-snap.db".to_string(),
            manifest_key: gallery.manifest_key,
            runtime: RuntimeMode::Auto,
            local_file_prefix: gallery.local_file_prefix,
            surface_persist_errors: gallery.surface_persist_errors,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads the config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn gallery_config(&self) -> PhotoGalleryConfig {
        PhotoGalleryConfig {
            manifest_key: self.manifest_key.clone(),
            local_file_prefix: self.local_file_prefix.clone(),
            surface_persist_errors: self.surface_persist_errors,
            ..PhotoGalleryConfig::default()
        }
    }
}
