//! Unified error types for the domain layer
//!
//! Covers the failures pure domain code can detect on its own: malformed
//! import documents and export envelopes that cannot be serialized.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Import text is not valid JSON
    #[error("Failed to parse JSON file: {0}")]
    Parse(String),

    /// Import document has no `plays` array
    #[error("Failed to parse JSON file: Invalid file format: missing plays array")]
    InvalidImportFormat,

    /// Import document has an empty `plays` array
    #[error("Failed to parse JSON file: No plays found in the file")]
    EmptyImport,

    /// Export envelope could not be serialized
    #[error("Failed to serialize export: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Creates a parse error for import text that is not valid JSON.
    ///
    /// # Example
    /// ```
    /// use squiggle_domain::DomainError;
    ///
    /// let err = DomainError::parse("expected value at line 1 column 1");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Failed to parse JSON file: expected value at line 1 column 1"
    /// );
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_keeps_detail() {
        let err = DomainError::parse("trailing comma");
        assert!(matches!(err, DomainError::Parse(_)));
        assert_eq!(err.to_string(), "Failed to parse JSON file: trailing comma");
    }

    #[test]
    fn test_invalid_import_format_message() {
        let err = DomainError::InvalidImportFormat;
        assert_eq!(
            err.to_string(),
            "Failed to parse JSON file: Invalid file format: missing plays array"
        );
    }

    #[test]
    fn test_empty_import_message() {
        assert_eq!(
            DomainError::EmptyImport.to_string(),
            "Failed to parse JSON file: No plays found in the file"
        );
    }
}
