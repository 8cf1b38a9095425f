//! Error types for the directory library.
//!
//! Library modules return [`DirectoryError`] through the [`Result`] alias.
//! The binary wraps these in `anyhow` for context-rich reporting.

use std::path::{Path, PathBuf};

/// Library-wide result type.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Everything that can go wrong while working with a [`crate::directory::Directory`].
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// A field value broke the validation rule or could not be coerced.
    #[error("Invalid entry: {0}")]
    Validation(String),

    /// A file the operation needs does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The backing file (or an export target) could not be read or written.
    #[error("Persistence error for {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    /// CSV encoding/decoding error outside of per-row recovery.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DirectoryError {
    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a persistence error for `path`.
    pub fn persistence(path: &Path, message: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// True for [`DirectoryError::Validation`].
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
