// Device camera bridge
//
// On Android the camera is driven through JNI calls into the host
// MainActivity, which writes the shot to a temporary file and exposes its
// path through static getters. Other platforms report the camera as
// unavailable.

use crate::backend::convert_file_src;
use crate::models::{CameraOptions, CameraPhoto};
use crate::platform::{Camera, PlatformError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<PickerError> for PlatformError {
    fn from(err: PickerError) -> Self {
        match err {
            PickerError::PermissionDenied(msg) => PlatformError::PermissionDenied(msg),
            // no photo within the wait window counts as a dismissed camera
            PickerError::Timeout(msg) | PickerError::Cancelled(msg) => {
                PlatformError::Cancelled(msg)
            }
            PickerError::PlatformNotSupported(msg) => PlatformError::Unavailable(msg),
            PickerError::Other(msg) => PlatformError::Other(msg),
        }
    }
}

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Configuration for the Android camera bridge
#[derive(Debug, Clone)]
pub struct AndroidCameraConfig {
    /// Fully qualified class name in slash format (e.g. "com/example/app/MainActivity")
    pub main_activity_class: String,
    /// How long to wait for the user to take a photo
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for AndroidCameraConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(100),
        }
    }
}

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};
#[cfg(target_os = "android")]
use jni::JNIEnv;

#[cfg(target_os = "android")]
fn jni_error<E: std::fmt::Display>(what: &'static str) -> impl Fn(E) -> PickerError {
    move |e| PickerError::Other(format!("{} failed: {}", what, e))
}

#[cfg(target_os = "android")]
fn app_class_loader<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
    let thread_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(jni_error("ActivityThread lookup"))?;
    let thread = env
        .call_static_method(
            &thread_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(jni_error("currentActivityThread"))?;
    let app = env
        .call_method(&thread, "getApplication", "()Landroid/app/Application;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getApplication"))?;
    if app.is_null() {
        return Err(PickerError::Other(
            "Application not available yet".to_string(),
        ));
    }
    env.call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getClassLoader"))
}

#[cfg(target_os = "android")]
fn load_class<'a>(
    env: &mut JNIEnv<'a>,
    loader: &JObject<'a>,
    fq_slash: &str,
) -> Result<JClass<'a>, PickerError> {
    // ClassLoader.loadClass wants dotted names
    let name: JString = env
        .new_string(fq_slash.replace('/', "."))
        .map_err(jni_error("new_string"))?;
    let cls = env
        .call_method(
            loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .and_then(|v| v.l())
        .map_err(jni_error("ClassLoader.loadClass"))?;
    Ok(JClass::from(cls))
}

#[cfg(target_os = "android")]
fn get_activity_instance<'a>(
    env: &mut JNIEnv<'a>,
    config: &AndroidCameraConfig,
) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
    let loader = app_class_loader(env)?;
    let cls = load_class(env, &loader, &config.main_activity_class)?;
    let signature = format!("()L{};", config.main_activity_class);

    let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
        Ok(value) => value.l().map_err(jni_error("getInstance()"))?,
        Err(_) => {
            // Kotlin without @JvmStatic only exposes the Companion getter
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            let companion_signature = format!("L{}$Companion;", config.main_activity_class);
            let companion = env
                .get_static_field(&cls, "Companion", &companion_signature)
                .and_then(|v| v.l())
                .map_err(jni_error("Companion field"))?;
            if companion.is_null() {
                return Err(PickerError::Other(
                    "MainActivity.Companion is null, activity not initialized?".to_string(),
                ));
            }
            env.call_method(&companion, "getInstance", &signature, &[])
                .and_then(|v| v.l())
                .map_err(jni_error("Companion.getInstance()"))?
        }
    };

    if instance.is_null() {
        return Err(PickerError::Other(
            "MainActivity instance is null, activity not initialized?".to_string(),
        ));
    }

    Ok((instance, cls))
}

#[cfg(target_os = "android")]
fn read_static_string<'a>(
    env: &mut JNIEnv<'a>,
    cls: &JClass<'a>,
    method: &str,
) -> Result<Option<String>, PickerError> {
    let Ok(value) = env.call_static_method(cls, method, "()Ljava/lang/String;", &[]) else {
        return Ok(None);
    };
    let Ok(obj) = value.l() else {
        return Ok(None);
    };
    if obj.is_null() {
        return Ok(None);
    }
    let jstr = JString::from(obj);
    let text: String = env
        .get_string(&jstr)
        .map_err(jni_error("String conversion"))?
        .into();
    Ok(Some(text))
}

#[cfg(target_os = "android")]
fn classify_activity_error(message: String) -> PickerError {
    let lower = message.to_lowercase();
    if lower.contains("cancel") {
        PickerError::Cancelled(message)
    } else if lower.contains("permission") {
        PickerError::PermissionDenied(message)
    } else {
        PickerError::Other(message)
    }
}

/// Capture a photo using the camera
///
/// Blocks the calling thread until the activity reports a file, an error or
/// the timeout elapses.
#[cfg(target_os = "android")]
pub fn capture_photo_with_config(config: &AndroidCameraConfig) -> Result<PathBuf, PickerError> {
    use ndk_context::android_context;

    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_error("JavaVM"))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(jni_error("JNI attach"))?;

    let (activity, main_cls) = get_activity_instance(&mut env, config)?;

    env.call_static_method(&main_cls, "clearLastError", "()V", &[])
        .map_err(jni_error("clearLastError"))?;
    env.call_method(&activity, "launchCamera", "()V", &[])
        .map_err(jni_error("launchCamera"))?;

    let deadline = std::time::Instant::now() + config.timeout;
    while std::time::Instant::now() < deadline {
        std::thread::sleep(config.poll_interval);

        if let Some(path) = read_static_string(&mut env, &main_cls, "getLastPhotoPath")? {
            log::debug!("Camera returned {}", path);
            return Ok(PathBuf::from(path));
        }
        if let Some(err) = read_static_string(&mut env, &main_cls, "getLastError")? {
            return Err(classify_activity_error(err));
        }
    }

    Err(PickerError::Timeout(
        "Camera timeout - no photo taken".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo_with_config(_config: &AndroidCameraConfig) -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

/// [`Camera`] backed by the device camera activity
#[derive(Debug, Clone, Default)]
pub struct DeviceCamera {
    config: AndroidCameraConfig,
    local_file_prefix: String,
}

impl DeviceCamera {
    pub fn new(config: AndroidCameraConfig, local_file_prefix: impl Into<String>) -> Self {
        Self {
            config,
            local_file_prefix: local_file_prefix.into(),
        }
    }
}

#[async_trait(?Send)]
impl Camera for DeviceCamera {
    async fn get_photo(&self, options: &CameraOptions) -> Result<CameraPhoto, PlatformError> {
        // The activity always stores a full quality JPEG from the rear camera
        log::debug!("Launching device camera ({:?})", options.source);

        let config = self.config.clone();
        let path = tokio::task::spawn_blocking(move || capture_photo_with_config(&config))
            .await
            .map_err(|e| PlatformError::Other(format!("Task join error: {}", e)))??;

        let path = path.to_string_lossy().to_string();
        let web_path = convert_file_src(&path, &self.local_file_prefix);
        Ok(CameraPhoto {
            path: Some(path),
            web_path: Some(web_path),
            format: "jpeg".to_string(),
        })
    }
}
