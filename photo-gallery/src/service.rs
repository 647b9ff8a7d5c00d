use crate::backend::StorageBackend;
use crate::data_url::DataUrl;
use crate::manifest::{decode_manifest, encode_manifest};
use crate::models::{CameraOptions, Photo, PhotoGalleryConfig, RuntimeKind};
use crate::platform::{Camera, KeyValueStore, PlatformError};

/// Error type for photo gallery operations
#[derive(Debug)]
pub enum PhotoGalleryError {
    /// A camera, filesystem or store call failed
    Platform(PlatformError),
    /// The stored manifest could not be deserialized
    PersistedStateCorrupt(serde_json::Error),
    /// The camera result lacks the field the runtime needs
    MissingCameraResult(String),
    /// Writing the manifest back to the store failed
    PersistFailed(PlatformError),
    Other(String),
}

impl std::fmt::Display for PhotoGalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoGalleryError::Platform(e) => write!(f, "Platform error: {}", e),
            PhotoGalleryError::PersistedStateCorrupt(e) => {
                write!(f, "Stored photo manifest is corrupt: {}", e)
            }
            PhotoGalleryError::MissingCameraResult(msg) => {
                write!(f, "Incomplete camera result: {}", msg)
            }
            PhotoGalleryError::PersistFailed(e) => {
                write!(f, "Failed to persist photo manifest: {}", e)
            }
            PhotoGalleryError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PhotoGalleryError {}

impl From<PlatformError> for PhotoGalleryError {
    fn from(err: PlatformError) -> Self {
        PhotoGalleryError::Platform(err)
    }
}

/// Handle returned by [`PhotoGalleryService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&[Photo])>;

/// Photo Gallery Service
///
/// Owns the ordered photo list (newest first). Every change goes through
/// [`set_photos`](Self::set_photos), which writes the manifest and then
/// notifies subscribers.
pub struct PhotoGalleryService {
    config: PhotoGalleryConfig,
    backend: Box<dyn StorageBackend>,
    camera: Box<dyn Camera>,
    store: Box<dyn KeyValueStore>,
    photos: Vec<Photo>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    clock: Box<dyn Fn() -> i64>,
}

impl PhotoGalleryService {
    pub fn new(
        config: PhotoGalleryConfig,
        backend: Box<dyn StorageBackend>,
        camera: Box<dyn Camera>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            backend,
            camera,
            store,
            photos: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            clock: Box::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replaces the millisecond clock used for capture filenames
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn runtime(&self) -> RuntimeKind {
        self.backend.kind()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Registers a listener that receives the full list after every change
    pub fn subscribe(&mut self, listener: impl Fn(&[Photo]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Loads the manifest, hydrates every entry in order and stores the result
    /// through [`set_photos`](Self::set_photos).
    ///
    /// Nothing is published or written if the manifest is corrupt or any entry
    /// fails to hydrate. A missing manifest is written back as `[]`.
    pub async fn initialize(&mut self) -> Result<(), PhotoGalleryError> {
        let stored = self.store.get(&self.config.manifest_key).await?;
        let loaded = decode_manifest(stored.as_deref())?;

        log::debug!(
            "Hydrating {} photos for {:?} runtime",
            loaded.len(),
            self.backend.kind()
        );

        let mut photos = Vec::with_capacity(loaded.len());
        for photo in loaded {
            photos.push(self.backend.hydrate(photo).await?);
        }

        log::info!("Photo gallery loaded with {} photos", photos.len());
        self.set_photos(photos).await
    }

    /// Takes a photo with the rear camera and prepends it to the gallery.
    pub async fn capture(&mut self) -> Result<Photo, PhotoGalleryError> {
        let captured = self.camera.get_photo(&CameraOptions::default()).await?;
        let filename = self.filename_for((self.clock)());

        let photo = self.backend.write_capture(&captured, &filename).await?;
        log::info!("Captured photo {}", photo.filepath);

        let mut photos = Vec::with_capacity(self.photos.len() + 1);
        photos.push(photo.clone());
        photos.extend(self.photos.iter().cloned());
        self.set_photos(photos).await?;

        Ok(photo)
    }

    /// Replaces the photo list, writes the manifest and notifies subscribers.
    ///
    /// Manifest write failures are logged. They are only returned when
    /// `surface_persist_errors` is set; the new list is published either way.
    pub async fn set_photos(&mut self, photos: Vec<Photo>) -> Result<(), PhotoGalleryError> {
        self.photos = photos;
        let persisted = self.persist().await;
        self.publish();

        if let Err(e) = persisted {
            log::error!("{}", e);
            if self.config.surface_persist_errors {
                return Err(e);
            }
        }
        Ok(())
    }

    /// Reads the stored image of the photo at `index` as a data URL
    pub async fn read_photo(&self, index: usize) -> Result<DataUrl, PhotoGalleryError> {
        let photo = self
            .photos
            .get(index)
            .ok_or_else(|| PhotoGalleryError::Other(format!("No photo at index {}", index)))?;
        self.backend.read_photo(photo).await
    }

    pub fn filename_for(&self, timestamp_ms: i64) -> String {
        format!("{}.{}", timestamp_ms, self.config.file_extension)
    }

    async fn persist(&self) -> Result<(), PhotoGalleryError> {
        let value = encode_manifest(&self.photos)?;
        self.store
            .set(&self.config.manifest_key, &value)
            .await
            .map_err(PhotoGalleryError::PersistFailed)
    }

    fn publish(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.photos);
        }
    }
}
