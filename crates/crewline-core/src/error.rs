//! Error types for the wizard library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all wizard operations.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Durable key-value store read/write errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Project submission failures (network/API)
    #[error("Submission failed: {message}")]
    Submission { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating storage errors with optional context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source<E>(self, source: E) -> WizardError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WizardError::Storage {
            message: self.message,
            source: Some(Box::new(source)),
        }
    }

    /// Build the error without a source.
    pub fn build(self) -> WizardError {
        WizardError::Storage {
            message: self.message,
            source: None,
        }
    }
}

impl WizardError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WizardError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a submission error with a message.
    pub fn submission(message: impl Into<String>) -> Self {
        WizardError::Submission {
            message: message.into(),
        }
    }
}

/// Specialized extension trait for storage-backed Results.
pub trait StorageResultExt<T> {
    /// Map storage errors with a message.
    fn storage_context(self, message: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn storage_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WizardError::storage(message).with_source(e))
    }
}

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;
