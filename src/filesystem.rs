use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use photo_gallery::{Directory, Filesystem, PlatformError};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(target_os = "android")]
fn android_files_dir() -> Option<PathBuf> {
    use jni::{objects::{JObject, JString}, JavaVM};
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?; // mutable for JNI calls
        let activity = JObject::from_raw(ctx.context().cast());
        let files_dir = env
            .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_obj = env
            .call_method(files_dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_files_dir() { return dir; }
        PathBuf::from("/data/local/tmp/photo-snap")
    }

    #[cfg(not(target_os = "android"))]
    {
        // On desktop, use ./data directory
        PathBuf::from("./data")
    }
}

fn file_uri(path: &Path) -> Result<String, PlatformError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(format!("file://{}", absolute.to_string_lossy()))
}

/// [`Filesystem`] on the local disk. `Data` and `Cache` map to
/// subdirectories of the app data directory.
#[derive(Debug, Clone)]
pub struct DiskFilesystem {
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl DiskFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("photos"),
            cache_dir: root.join("cache"),
        }
    }

    fn resolve(&self, path: &str, directory: Option<Directory>) -> PathBuf {
        if let Some(stripped) = path.strip_prefix("file://") {
            return PathBuf::from(stripped);
        }
        let p = Path::new(path);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        match directory {
            Some(Directory::Data) => self.data_dir.join(p),
            Some(Directory::Cache) => self.cache_dir.join(p),
            None => p.to_path_buf(),
        }
    }
}

#[async_trait(?Send)]
impl Filesystem for DiskFilesystem {
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError> {
        let filepath = self.resolve(path, directory);
        let bytes = fs::read(&filepath)?;
        log::debug!("Read {} bytes from {:?}", bytes.len(), filepath);
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Option<Directory>,
    ) -> Result<String, PlatformError> {
        let filepath = self.resolve(path, directory);
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| PlatformError::Other(format!("Invalid base64 data: {}", e)))?;

        if let Some(parent) = filepath.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&filepath, &bytes)?;
        log::debug!("Wrote {} bytes to {:?}", bytes.len(), filepath);

        file_uri(&filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_in_data_dir() {
        let root = tempfile::tempdir().unwrap();
        let fs = DiskFilesystem::new(root.path());

        let uri = fs
            .write_file("1700000000000.jpeg", "AAAA", Some(Directory::Data))
            .await
            .unwrap();
        let expected = root.path().join("photos").join("1700000000000.jpeg");
        assert_eq!(uri, format!("file://{}", expected.to_string_lossy()));
        assert_eq!(std::fs::read(&expected).unwrap(), vec![0, 0, 0]);

        // both the URI and the relative name resolve to the same file
        let by_uri = fs.read_file(&uri, Some(Directory::Data)).await.unwrap();
        let by_name = fs
            .read_file("1700000000000.jpeg", Some(Directory::Data))
            .await
            .unwrap();
        assert_eq!(by_uri, "AAAA");
        assert_eq!(by_name, "AAAA");
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_directory() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("camera.jpeg");
        std::fs::write(&source, [0xff, 0xd8, 0xff]).unwrap();

        let fs = DiskFilesystem::new(root.path().join("app"));
        let data = fs
            .read_file(source.to_str().unwrap(), Some(Directory::Data))
            .await
            .unwrap();
        assert_eq!(data, "/9j/");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let root = tempfile::tempdir().unwrap();
        let fs = DiskFilesystem::new(root.path());
        let result = fs.read_file("nope.jpeg", Some(Directory::Data)).await;
        assert!(matches!(result, Err(PlatformError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let fs = DiskFilesystem::new(root.path());
        let result = fs
            .write_file("x.jpeg", "not base64!", Some(Directory::Data))
            .await;
        assert!(matches!(result, Err(PlatformError::Other(_))));
    }
}
