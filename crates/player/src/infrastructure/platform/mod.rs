//! Platform-specific implementations
//!
//! This module provides platform-specific implementations of the
//! platform abstraction traits defined in ports/outbound/platform.rs.
//!
//! The correct platform is selected at compile time based on the target architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

// Re-export the platform-specific types explicitly
#[cfg(target_arch = "wasm32")]
pub use wasm::{
    create_platform, WasmExportSink, WasmFileImportSource, WasmRandomProvider,
    WasmStorageProvider, WasmTimeProvider,
};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{
    create_platform, DesktopExportSink, DesktopRandomProvider, DesktopStorageProvider,
    DesktopTimeProvider, FileImportSource,
};

// Test fakes live in `crate::infrastructure::platform::mock` (tests and the `testing` feature).
