//! # Error Module
//!
//! Error types for the fingerprint library.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, dimensions, what went wrong
//! - **Stable kinds** - every error maps onto one [`ErrorKind`] that callers
//!   can match on without parsing messages

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while decoding or hashing an image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image: {reason}")]
    DecodeError { reason: String },

    #[error("Image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Unsupported pixel layout: {channels} channels")]
    UnsupportedLayout { channels: u8 },

    #[error("Image decoding is unavailable: {0}")]
    Unavailable(String),

    #[error("Hash computation failed: {0}")]
    ComputationFailed(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Expected a {}x{} matrix, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Not a 16-digit lowercase hex hash: {value:?}")]
    InvalidHashString { value: String },

    #[error("Failed to read image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify this error for the result envelope
    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::DecodeError { .. }
            | HashError::EmptyImage { .. }
            | HashError::UnsupportedLayout { .. }
            | HashError::InvalidHashString { .. } => ErrorKind::DecodeError,
            HashError::Unavailable(_) => ErrorKind::UnavailableError,
            HashError::ComputationFailed(_)
            | HashError::DimensionMismatch { .. }
            | HashError::WorkerPool(_) => ErrorKind::InternalComputationError,
            HashError::IoError { .. } => ErrorKind::IoError,
        }
    }
}

/// Error categories reported to callers of `process`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unreadable, corrupt or empty image buffer
    DecodeError,
    /// The decoding capability is missing
    UnavailableError,
    /// Unexpected numeric or internal failure
    InternalComputationError,
    /// The input path could not be read
    IoError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DecodeError => write!(f, "DecodeError"),
            ErrorKind::UnavailableError => write!(f, "UnavailableError"),
            ErrorKind::InternalComputationError => write!(f, "InternalComputationError"),
            ErrorKind::IoError => write!(f, "IoError"),
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FingerprintError>;
