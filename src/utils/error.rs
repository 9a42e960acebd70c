//! Error types for the media transform engine.
//!
//! Every failure the engine can surface is a variant of [`MediaError`]. Variants carry
//! rendered messages rather than source errors so outcomes can be cloned into batch
//! results and serialized for whatever host reports them.

use std::path::{Path, PathBuf};
use serde::Serialize;
use thiserror::Error;

/// Main error type for transform operations.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MediaError {
    /// No operation is registered under the identifier
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// An operation with the identifier is already registered
    #[error("Operation already registered: {0}")]
    DuplicateOperation(String),

    /// The file extension is not handled by the operation
    #[error("Operation '{operation}' does not support extension '{extension}'")]
    UnsupportedExtension { operation: String, extension: String },

    /// Batch processing was requested for an interactive-only operation
    #[error("Operation '{0}' cannot be used in batch processing")]
    NotBatchProcessable(String),

    /// The source file could not be read
    #[error("Cannot read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The bytes could not be parsed as the declared format
    #[error("Corrupt image data: {0}")]
    CorruptData(String),

    /// Extension or pixel layout the codec cannot handle
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Option missing or malformed for the operation
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// The transformed raster could not be encoded
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Temp-write or atomic replace failed; the target is untouched
    #[error("Cannot write {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// Batch was cancelled before this file was submitted
    #[error("Cancelled before processing: {0}")]
    Cancelled(PathBuf),

    /// A batch worker task died or the pool was closed
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience result type for transform operations.
pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    pub fn invalid_option(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn read(path: impl AsRef<Path>, err: impl ToString) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn write(path: impl AsRef<Path>, err: impl ToString) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn unsupported_format<T: Into<String>>(msg: T) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn corrupt<T: Into<String>>(msg: T) -> Self {
        Self::CorruptData(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }
}
