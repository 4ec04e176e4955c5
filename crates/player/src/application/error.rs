//! Errors surfaced to UI callers.
//!
//! Every variant renders as a human-readable message; callers show
//! `to_string()` directly.

use thiserror::Error;

use squiggle_domain::DomainError;

use crate::ports::outbound::PlatformError;
use crate::stores::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store refused the operation (expired session)
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Import document or export envelope was malformed
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Play not found")]
    NotFound,

    #[error("No plays to export")]
    NoPlaysToExport,

    /// The import source could not be read
    #[error("Failed to read file")]
    ReadFailed(#[source] PlatformError),

    /// The platform could not deliver the export
    #[error("Failed to export plays: {0}")]
    Export(#[source] PlatformError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_message() {
        let err = ServiceError::from(StoreError::SessionExpired);
        assert_eq!(err.to_string(), "Session expired");
    }

    #[test]
    fn domain_errors_keep_their_message() {
        let err = ServiceError::from(DomainError::EmptyImport);
        assert_eq!(
            err.to_string(),
            "Failed to parse JSON file: No plays found in the file"
        );
    }

    #[test]
    fn read_failure_hides_platform_detail() {
        let err = ServiceError::ReadFailed(PlatformError::Js("NotReadableError".into()));
        assert_eq!(err.to_string(), "Failed to read file");
        assert!(std::error::Error::source(&err).is_some());
    }
}
