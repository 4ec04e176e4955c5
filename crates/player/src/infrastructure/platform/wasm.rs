//! WASM platform implementations
//!
//! Provides browser implementations backed by `window.sessionStorage`,
//! `Date.now()`, `Math.random()` and Blob downloads.

use crate::ports::outbound::{
    ExportSink, ImportSource, PlatformError, RandomProvider, StorageProvider, TimeProvider,
};
use crate::state::Platform;
use wasm_bindgen::{JsCast, JsValue};

fn js_error(value: JsValue) -> PlatformError {
    PlatformError::Js(format!("{:?}", value))
}

/// WASM time provider using `Date.now()`
#[derive(Clone, Default)]
pub struct WasmTimeProvider;

impl TimeProvider for WasmTimeProvider {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// WASM random provider using `Math.random()`
#[derive(Clone, Default)]
pub struct WasmRandomProvider;

impl RandomProvider for WasmRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        let span = f64::from(max - min + 1);
        min + (js_sys::Math::random() * span).floor() as i32
    }
}

/// WASM storage provider using `window.sessionStorage`
///
/// The handle is looked up per call; `web_sys::Storage` is not `Send`.
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl WasmStorageProvider {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }
}

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::error!("Failed to save to session storage: {:?}", e);
                }
            }
            None => tracing::warn!("Session storage unavailable, dropping write for {}", key),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::error!("Failed to remove from session storage: {:?}", e);
            }
        }
    }
}

/// WASM export sink triggering a browser download
#[derive(Clone, Default)]
pub struct WasmExportSink;

impl ExportSink for WasmExportSink {
    fn deliver(&self, file_name: &str, mime_type: &str, contents: &str) -> Result<(), PlatformError> {
        let window =
            web_sys::window().ok_or_else(|| PlatformError::Unavailable("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| PlatformError::Unavailable("document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| PlatformError::Unavailable("document body".to_string()))?;

        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(js_error)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let anchor: web_sys::HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| PlatformError::Js("created element is not an anchor".to_string()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);

        body.append_child(&anchor).map_err(js_error)?;
        anchor.click();
        body.remove_child(&anchor).map_err(js_error)?;
        web_sys::Url::revoke_object_url(&url).map_err(js_error)?;

        tracing::info!("Export download triggered: {}", file_name);
        Ok(())
    }
}

/// Import source wrapping a `File` picked in an `<input type="file">`
pub struct WasmFileImportSource {
    file: web_sys::File,
}

impl WasmFileImportSource {
    pub fn new(file: web_sys::File) -> Self {
        Self { file }
    }
}

#[async_trait::async_trait(?Send)]
impl ImportSource for WasmFileImportSource {
    async fn read_text(&self) -> Result<String, PlatformError> {
        let text = wasm_bindgen_futures::JsFuture::from(self.file.text())
            .await
            .map_err(js_error)?;
        text.as_string()
            .ok_or_else(|| PlatformError::Js("file contents were not text".to_string()))
    }
}

/// Create platform services for the browser
pub fn create_platform() -> Platform {
    Platform::new(
        WasmTimeProvider,
        WasmRandomProvider,
        WasmStorageProvider,
        WasmExportSink,
    )
}
