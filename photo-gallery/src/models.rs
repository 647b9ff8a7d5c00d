use serde::{Deserialize, Serialize};

/// A single captured photo as stored in the gallery manifest.
///
/// `filepath` is the durable identity of the photo and is never rewritten once
/// assigned. `display_path` is derived data: native runtimes rebuild it from
/// `filepath` on every cold load, browser runtimes keep the value written at
/// capture time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Photo {
    pub filepath: String,
    // Older web builds wrote the renderable URI as `webViewPath`
    #[serde(
        rename = "displayPath",
        alias = "webViewPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_path: Option<String>,
}

impl Photo {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            display_path: None,
        }
    }

    pub fn with_display_path(mut self, display_path: impl Into<String>) -> Self {
        self.display_path = Some(display_path.into());
        self
    }
}

/// Directory scopes understood by the filesystem capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directory {
    /// Application-private data directory (survives restarts)
    Data,
    /// Cache directory (may be purged by the OS)
    Cache,
}

/// The execution environment the gallery runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeKind {
    /// Hybrid/native shell with device filesystem and camera access
    Native,
    /// Plain browser context
    Browser,
}

impl RuntimeKind {
    pub fn from_native_flag(is_native: bool) -> Self {
        if is_native {
            RuntimeKind::Native
        } else {
            RuntimeKind::Browser
        }
    }

    pub fn is_native(self) -> bool {
        self == RuntimeKind::Native
    }
}

/// How the camera should hand back its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResultType {
    /// A file path plus a web-renderable path (no inline bytes)
    Uri,
    Base64,
    DataUrl,
}

/// Which image source the camera capability should open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Prompt,
    /// Rear/primary device camera
    Camera,
    Photos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraOptions {
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// JPEG quality, 0-100
    pub quality: u8,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            quality: 100,
        }
    }
}

/// Raw result of a camera capture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraPhoto {
    /// Temporary file path on native runtimes
    pub path: Option<String>,
    /// URI the web view can render directly (blob URI in browsers)
    pub web_path: Option<String>,
    pub format: String,
}

/// Configuration for the gallery service
#[derive(Debug, Clone)]
pub struct PhotoGalleryConfig {
    /// Key under which the manifest is kept in the key-value store
    pub manifest_key: String,
    /// Directory scope captured images are written to
    pub data_directory: Directory,
    /// MIME type used for hydrated data URIs
    pub display_mime: String,
    /// Extension appended to timestamp filenames
    pub file_extension: String,
    /// Prefix the native runtime serves local files under
    pub local_file_prefix: String,
    /// Return manifest write failures to the caller instead of only logging them
    pub surface_persist_errors: bool,
}

impl Default for PhotoGalleryConfig {
    fn default() -> Self {
        Self {
            manifest_key: "photos".to_string(),
            data_directory: Directory::Data,
            display_mime: "image/jpeg".to_string(),
            file_extension: "jpeg".to_string(),
            local_file_prefix: "http://localhost/_app_file_".to_string(),
            surface_persist_errors: false,
        }
    }
}
