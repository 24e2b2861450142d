//! Unified error handling for texforge
//!
//! This module provides an error type that encompasses the failure modes
//! of an export session, shared across the texforge crates.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all texforge operations
#[derive(Error, Debug)]
pub enum Error {
    // ==================== I/O Errors ====================

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file for an asset is absent
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // ==================== Source Errors ====================

    /// A source image could not be made pixel-accessible
    #[error("Unreadable source image: {path}")]
    UnreadableSource { path: PathBuf },

    /// Invalid data structure
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    // ==================== Export Errors ====================

    /// Export failed
    #[error("Export failed: {message}")]
    ExportFailed { message: String },

    /// Custom error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Result type using the unified Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData {
            message: message.into(),
        }
    }

    /// Create an export failure error
    pub fn export_failed(message: impl Into<String>) -> Self {
        Error::ExportFailed {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_context() {
        let err = Error::FileNotFound(PathBuf::from("/test"));
        let contextualized = err.with_context("while exporting textures");

        assert!(contextualized.to_string().contains("while exporting textures"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::FileNotFound(PathBuf::from("/test")).is_not_found());
        assert!(!Error::invalid_data("bad manifest").is_not_found());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::FileNotFound(PathBuf::from("/test")));
        let with_context = result.context("loading manifest");

        assert!(with_context.is_err());
        assert!(with_context.unwrap_err().to_string().contains("loading manifest"));
    }
}
