//! Error types for notebook patching

use std::path::PathBuf;
use thiserror::Error;

/// Error type for notebook patching operations
#[derive(Error, Debug)]
pub enum PatchError {
    /// I/O error when reading or writing a notebook file
    #[error("Failed to access notebook file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for a specific notebook
    #[error("Failed to parse notebook JSON in {}: {source}", .notebook.display())]
    Json {
        /// Path of the offending notebook
        notebook: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Supplied notebooks root does not exist or is not a directory
    #[error("'{}' is not an existing directory", .0.display())]
    InvalidDirectory(PathBuf),

    /// A declared substitution source string is absent from its cell
    #[error("Processing {} failed: {needle} does not exist in cell", .notebook.display())]
    MissingTarget {
        /// Path of the offending notebook
        notebook: PathBuf,
        /// The substring that was declared but not found
        needle: String,
    },

    /// Malformed `test_replace` metadata (not an object, or non-string values)
    #[error("Invalid test_replace metadata in {}: {detail}", .notebook.display())]
    InvalidReplace {
        /// Path of the offending notebook
        notebook: PathBuf,
        /// What was wrong with the mapping
        detail: String,
    },
}

/// Result type alias for notebook patching operations
pub type Result<T> = std::result::Result<T, PatchError>;
