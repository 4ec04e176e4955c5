//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in platform/desktop.rs or platform/wasm.rs
//! - Created by `MockPlatform::new()` in tests
//! - Handed to `PlayStore::new` and `PlayService::new`

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::ports::outbound::{
    ExportSink, PlatformError, RandomProvider, StorageProvider, TimeProvider,
};

/// Unified platform services container
///
/// Provides all platform abstractions through a single injectable type.
#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProviderDyn>,
    random: Arc<dyn RandomProviderDyn>,
    storage: Arc<dyn StorageProviderDyn>,
    export: Arc<dyn ExportSink>,
}

// =============================================================================
// Dynamic trait versions for Arc storage
// =============================================================================

trait TimeProviderDyn: Send + Sync {
    fn now_millis(&self) -> u64;
    fn now_utc(&self) -> DateTime<Utc>;
}

trait RandomProviderDyn: Send + Sync {
    fn random_range(&self, min: i32, max: i32) -> i32;
}

trait StorageProviderDyn: Send + Sync {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

// =============================================================================
// Blanket implementations - convert port traits to dyn-safe wrappers
// =============================================================================

impl<T: TimeProvider + Send + Sync> TimeProviderDyn for T {
    fn now_millis(&self) -> u64 {
        TimeProvider::now_millis(self)
    }
    fn now_utc(&self) -> DateTime<Utc> {
        TimeProvider::now_utc(self)
    }
}

impl<T: RandomProvider + Send + Sync> RandomProviderDyn for T {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        RandomProvider::random_range(self, min, max)
    }
}

impl<T: StorageProvider + Send + Sync> StorageProviderDyn for T {
    fn save(&self, key: &str, value: &str) {
        StorageProvider::save(self, key, value)
    }
    fn load(&self, key: &str) -> Option<String> {
        StorageProvider::load(self, key)
    }
    fn remove(&self, key: &str) {
        StorageProvider::remove(self, key)
    }
}

// =============================================================================
// Platform implementation
// =============================================================================

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<Tm, R, S, E>(time: Tm, random: R, storage: S, export: E) -> Self
    where
        Tm: TimeProvider + Send + Sync,
        R: RandomProvider + Send + Sync,
        S: StorageProvider + Send + Sync,
        E: ExportSink + 'static,
    {
        Self {
            time: Arc::new(time),
            random: Arc::new(random),
            storage: Arc::new(storage),
            export: Arc::new(export),
        }
    }

    // -------------------------------------------------------------------------
    // Time operations
    // -------------------------------------------------------------------------

    /// Get current time in milliseconds since epoch
    pub fn now_millis(&self) -> u64 {
        self.time.now_millis()
    }

    /// Get current time as a UTC datetime
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.time.now_utc()
    }

    // -------------------------------------------------------------------------
    // Random operations
    // -------------------------------------------------------------------------

    /// Generate random i32 in range [min, max] (inclusive)
    pub fn random_range(&self, min: i32, max: i32) -> i32 {
        self.random.random_range(min, max)
    }

    // -------------------------------------------------------------------------
    // Storage operations
    // -------------------------------------------------------------------------

    /// Save a string value with the given key
    pub fn storage_save(&self, key: &str, value: &str) {
        self.storage.save(key, value)
    }

    /// Load a string value by key, returns None if not found
    pub fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    /// Remove a value by key
    pub fn storage_remove(&self, key: &str) {
        self.storage.remove(key)
    }

    // -------------------------------------------------------------------------
    // Export operations
    // -------------------------------------------------------------------------

    /// Hand an exported document to the platform (download, file write)
    pub fn deliver_export(
        &self,
        file_name: &str,
        mime_type: &str,
        contents: &str,
    ) -> Result<(), PlatformError> {
        self.export.deliver(file_name, mime_type, contents)
    }
}
