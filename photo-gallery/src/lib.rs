//! # Photo Gallery
//!
//! Photo capture and gallery management for hybrid (native shell) and plain
//! browser runtimes.
//!
//! This crate provides:
//! - An ordered, newest-first photo list with change subscriptions
//! - Capture through a camera capability, persisting the image bytes
//! - A JSON manifest kept in a key-value store and reloaded on startup
//! - Hydration of stored file references into renderable data URIs
//!
//! ## Platform Separation
//!
//! The camera, filesystem and key-value store are host capabilities described
//! by the traits in [`platform`]. The application crate implements them;
//! [`backend::select_backend`] picks the native or browser storage strategy
//! once at startup.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_gallery::{select_backend, PhotoGalleryConfig, PhotoGalleryService, RuntimeKind};
//!
//! let config = PhotoGalleryConfig::default();
//! let backend = select_backend(RuntimeKind::Native, Box::new(fs), Box::new(fetcher), &config);
//! let mut gallery = PhotoGalleryService::new(config, backend, Box::new(camera), Box::new(store));
//!
//! gallery.initialize().await?;
//! let photo = gallery.capture().await?;
//! ```

pub mod backend;
pub mod data_url;
pub mod manifest;
pub mod models;
pub mod picker;
pub mod platform;
pub mod service;

#[cfg(test)]
mod testing;

pub use backend::{
    convert_file_src, select_backend, BrowserStorageBackend, NativeStorageBackend, StorageBackend,
};
pub use data_url::{guess_mime_from_path, DataUrl};
pub use manifest::{decode_manifest, encode_manifest};
pub use models::{
    CameraOptions, CameraPhoto, CameraResultType, CameraSource, Directory, Photo,
    PhotoGalleryConfig, RuntimeKind,
};
pub use picker::{AndroidCameraConfig, DeviceCamera, PickerError};
pub use platform::{BlobFetcher, Camera, Filesystem, KeyValueStore, PlatformError};
pub use service::{PhotoGalleryError, PhotoGalleryService, SubscriptionId};
