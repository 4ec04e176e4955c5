//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing stores and services to reach storage, clocks and files without
//! depending on concrete implementations.

pub mod platform;

pub use platform::{
    storage_keys, ExportSink, ImportSource, PlatformError, RandomProvider, StorageProvider,
    TimeProvider, JSON_MIME_TYPE,
};
#[cfg(test)]
pub use platform::MockExportSink;
