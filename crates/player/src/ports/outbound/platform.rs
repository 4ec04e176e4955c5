//! Platform abstraction ports for cross-platform compatibility
//!
//! These traits abstract platform-specific operations so that:
//! 1. Store and service code remains platform-agnostic
//! 2. Browser-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`, not here.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Failure reported by a platform adapter
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Filesystem access failed (desktop)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A browser API threw
    #[error("Browser API error: {0}")]
    Js(String),

    /// The platform facility is missing (no window, no storage, ...)
    #[error("Platform facility unavailable: {0}")]
    Unavailable(String),
}

/// Time operations abstraction
pub trait TimeProvider: Clone + 'static {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> u64;

    /// Current time as a UTC datetime, derived from [`Self::now_millis`]
    fn now_utc(&self) -> DateTime<Utc> {
        i64::try_from(self.now_millis())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default()
    }
}

/// Random number generation abstraction
pub trait RandomProvider: Clone + 'static {
    /// Generate random i32 in range [min, max] (inclusive)
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// Session-scoped storage abstraction (sessionStorage/file-based)
///
/// Writes are best-effort: adapters log failures instead of returning them.
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Destination for exported documents (browser download, file on disk)
#[cfg_attr(test, mockall::automock)]
pub trait ExportSink: Send + Sync {
    /// Hand over a finished document under a suggested file name
    fn deliver(&self, file_name: &str, mime_type: &str, contents: &str)
        -> Result<(), PlatformError>;
}

/// Single-shot text source for imports (a picked file, a path)
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait ImportSource {
    /// Read the whole source as UTF-8 text
    async fn read_text(&self) -> Result<String, PlatformError>;
}

/// Storage key constants
///
/// These are kept in the ports layer as they define the contract for
/// what keys are used across the application.
pub mod storage_keys {
    pub const PLAYS: &str = "squiggle_plays";
}
