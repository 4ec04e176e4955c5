//! In-memory platform for tests.
//!
//! Every fake shares its state through `Arc`, so a test keeps a handle to the
//! clock or storage after the `Platform` has been moved into a store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::outbound::{
    ExportSink, ImportSource, PlatformError, RandomProvider, StorageProvider, TimeProvider,
};
use crate::state::Platform;

/// 2024-01-15T10:30:00.000Z
pub const MOCK_START_MILLIS: u64 = 1_705_314_600_000;

/// Clock that only moves when told to
#[derive(Clone)]
pub struct MockTimeProvider {
    millis: Arc<AtomicU64>,
}

impl MockTimeProvider {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub fn set_millis(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance_millis(&self, delta: u64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_millis(secs * 1000);
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new(MOCK_START_MILLIS)
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Deterministic random source: walks through the range one step per call
#[derive(Clone, Default)]
pub struct MockRandomProvider {
    counter: Arc<AtomicU32>,
}

impl RandomProvider for MockRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        let span = (max - min + 1).max(1) as u32;
        let step = self.counter.fetch_add(1, Ordering::SeqCst);
        min + (step % span) as i32
    }
}

/// Random source that always returns the same value
#[derive(Clone)]
pub struct FixedRandomProvider(pub i32);

impl RandomProvider for FixedRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max)
    }
}

/// Key-value storage kept in memory
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorageProvider {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.save(key, value);
        storage
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// A document handed to [`CapturingExportSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Export sink that records every delivered document
#[derive(Clone, Default)]
pub struct CapturingExportSink {
    files: Arc<Mutex<Vec<ExportedFile>>>,
}

impl CapturingExportSink {
    pub fn files(&self) -> Vec<ExportedFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExportSink for CapturingExportSink {
    fn deliver(&self, file_name: &str, mime_type: &str, contents: &str) -> Result<(), PlatformError> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExportedFile {
                file_name: file_name.to_string(),
                mime_type: mime_type.to_string(),
                contents: contents.to_string(),
            });
        Ok(())
    }
}

/// Import source serving a fixed string
#[derive(Debug, Clone)]
pub struct StringImportSource(pub String);

impl StringImportSource {
    pub fn new(contents: impl Into<String>) -> Self {
        Self(contents.into())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl ImportSource for StringImportSource {
    async fn read_text(&self) -> Result<String, PlatformError> {
        Ok(self.0.clone())
    }
}

/// Import source whose read always fails
#[derive(Debug, Clone, Default)]
pub struct FailingImportSource;

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl ImportSource for FailingImportSource {
    async fn read_text(&self) -> Result<String, PlatformError> {
        Err(PlatformError::Unavailable("test file".to_string()))
    }
}

/// A [`Platform`] plus handles to the fakes behind it
#[derive(Clone)]
pub struct MockPlatform {
    pub platform: Platform,
    pub clock: MockTimeProvider,
    pub storage: MemoryStorageProvider,
    pub exports: CapturingExportSink,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorageProvider::default())
    }

    /// Build around pre-populated storage
    pub fn with_storage(storage: MemoryStorageProvider) -> Self {
        let clock = MockTimeProvider::default();
        let exports = CapturingExportSink::default();
        let platform = Platform::new(
            clock.clone(),
            MockRandomProvider::default(),
            storage.clone(),
            exports.clone(),
        );
        Self {
            platform,
            clock,
            storage,
            exports,
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}
