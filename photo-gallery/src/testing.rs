//! In-memory capabilities for unit tests.

use crate::data_url::DataUrl;
use crate::models::{CameraOptions, CameraPhoto, Directory};
use crate::platform::{BlobFetcher, Camera, Filesystem, KeyValueStore, PlatformError};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Filesystem keyed by normalised `file://` URIs. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryFilesystem {
    files: Rc<RefCell<HashMap<String, String>>>,
    reads: Rc<RefCell<HashMap<String, usize>>>,
}

impl MemoryFilesystem {
    fn resolve(path: &str, directory: Option<Directory>) -> String {
        if path.starts_with("file://") {
            return path.to_string();
        }
        if let Some(absolute) = path.strip_prefix('/') {
            return format!("file:///{}", absolute);
        }
        match directory {
            Some(Directory::Data) => format!("file:///data/{}", path),
            Some(Directory::Cache) => format!("file:///cache/{}", path),
            None => format!("file:///{}", path),
        }
    }

    pub fn insert(&self, path: &str, data: &str) {
        self.files
            .borrow_mut()
            .insert(Self::resolve(path, None), data.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&Self::resolve(path, None)).cloned()
    }

    pub fn read_count(&self, path: &str) -> usize {
        self.reads
            .borrow()
            .get(&Self::resolve(path, None))
            .copied()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }
}

#[async_trait(?Send)]
impl Filesystem for MemoryFilesystem {
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError> {
        let key = Self::resolve(path, directory);
        *self.reads.borrow_mut().entry(key.clone()).or_insert(0) += 1;
        self.files
            .borrow()
            .get(&key)
            .cloned()
            .ok_or(PlatformError::NotFound(key))
    }

    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError> {
        let key = Self::resolve(path, directory);
        self.files.borrow_mut().insert(key.clone(), data.to_string());
        Ok(key)
    }
}

/// Key-value store that can be told to fail writes
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PlatformError> {
        if self.fail_writes.get() {
            return Err(PlatformError::Unavailable("store is read-only".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Camera that replays queued results and cancels once the queue is empty
#[derive(Clone, Default)]
pub struct StubCamera {
    results: Rc<RefCell<VecDeque<Result<CameraPhoto, PlatformError>>>>,
    last_options: Rc<RefCell<Option<CameraOptions>>>,
}

impl StubCamera {
    pub fn push(&self, photo: CameraPhoto) {
        self.results.borrow_mut().push_back(Ok(photo));
    }

    pub fn push_error(&self, err: PlatformError) {
        self.results.borrow_mut().push_back(Err(err));
    }

    pub fn last_options(&self) -> Option<CameraOptions> {
        self.last_options.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Camera for StubCamera {
    async fn get_photo(&self, options: &CameraOptions) -> Result<CameraPhoto, PlatformError> {
        *self.last_options.borrow_mut() = Some(options.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PlatformError::Cancelled("User cancelled photos app".into())))
    }
}

#[derive(Clone, Default)]
pub struct StubFetcher {
    blobs: HashMap<String, DataUrl>,
}

impl StubFetcher {
    pub fn new(web_path: &str, data_url: DataUrl) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(web_path.to_string(), data_url);
        Self { blobs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, web_path: &str, data_url: DataUrl) -> Self {
        self.blobs.insert(web_path.to_string(), data_url);
        self
    }
}

#[async_trait(?Send)]
impl BlobFetcher for StubFetcher {
    async fn fetch_data_url(&self, web_path: &str) -> Result<DataUrl, PlatformError> {
        self.blobs
            .get(web_path)
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(web_path.to_string()))
    }
}
