use std::fmt;

/// Central error types for the photo-snap app
#[derive(Debug)]
pub enum AppError {
    /// Database error (rusqlite)
    Database(rusqlite::Error),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Invalid or unreadable configuration
    Config(String),
    /// Error from the gallery library
    Gallery(photo_gallery::PhotoGalleryError),
    /// Permission denied (e.g. camera)
    PermissionDenied(String),
    /// General error
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Gallery(e) => write!(f, "{}", e),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<photo_gallery::PhotoGalleryError> for AppError {
    fn from(e: photo_gallery::PhotoGalleryError) -> Self {
        use photo_gallery::{PhotoGalleryError, PlatformError};
        match e {
            PhotoGalleryError::Platform(PlatformError::PermissionDenied(msg)) => {
                AppError::PermissionDenied(msg)
            }
            other => AppError::Gallery(other),
        }
    }
}

/// User-friendly error messages for the CLI
impl AppError {
    pub fn user_message(&self) -> String {
        use photo_gallery::{PhotoGalleryError, PlatformError};
        match self {
            AppError::Database(_) => "A database error occurred. Please try again.".to_string(),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::Gallery(PhotoGalleryError::Platform(PlatformError::Cancelled(_))) => {
                "No photo was taken.".to_string()
            }
            AppError::Gallery(PhotoGalleryError::PersistedStateCorrupt(_)) => {
                "The saved photo list is damaged and could not be loaded.".to_string()
            }
            AppError::Gallery(e) => e.to_string(),
            AppError::PermissionDenied(msg) => format!("Permission required: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }
}
