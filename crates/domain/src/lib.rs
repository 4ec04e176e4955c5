//! Squiggle domain layer.
//!
//! Pure types and list logic for rugby plays. Nothing in this crate touches
//! storage, clocks or randomness; those are injected by `squiggle-player`.

pub mod collection;
pub mod common;
pub mod entities;
pub mod error;
pub mod export;
pub mod ids;
pub mod import;

pub use collection::PlayCollection;
pub use entities::{CreatePlayRequest, Play, PlayerState, Position, StateTimestamp};
pub use error::DomainError;
pub use export::{export_file_name, ExportMetadata, PlayExport, EXPORT_APP_NAME, EXPORT_VERSION};
pub use ids::PlayId;
pub use import::{parse_import_document, validate_entry, ImportEntryError, ImportSummary};
