//! Squiggle player crate.
//!
//! Session-gated storage for rugby plays plus their JSON export and import.
//! Platform adapters (browser session storage or a desktop file, clock,
//! randomness, downloads) are selected at compile time via `cfg`.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod stores;

#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use application::services::{PlayService, SharedPlayStore};
pub use application::ServiceError;
pub use config::{PlayStoreConfig, DEFAULT_SESSION_TIMEOUT};
pub use infrastructure::init_logging;
pub use infrastructure::platform::create_platform;
pub use state::Platform;
pub use stores::{PlayStore, SessionGuard, StoreError};

pub use squiggle_domain as domain;
