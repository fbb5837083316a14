//! Uniform success/error envelope returned by tools.
//!
//! A [`ProcessResult`] is either a success carrying data or a failure
//! carrying an [`ErrorDescriptor`], never both. The fields are private and
//! the only constructors are [`ProcessResult::success`] and
//! [`ProcessResult::failure`].

use crate::error::{ErrorKind, HashError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Description of a failure, safe to log or serialize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&HashError> for ErrorDescriptor {
    fn from(error: &HashError) -> Self {
        Self::new(error.kind(), error.to_string())
    }
}

impl From<HashError> for ErrorDescriptor {
    fn from(error: HashError) -> Self {
        Self::from(&error)
    }
}

impl std::fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Timing information attached to every result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetadata {
    pub processing_time_ms: u64,
}

impl ProcessMetadata {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Outcome of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ProcessMetadata>,
}

impl<T> ProcessResult<T> {
    /// A successful result
    pub fn success(data: T, metadata: Option<ProcessMetadata>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata,
        }
    }

    /// A failed result
    pub fn failure(error: ErrorDescriptor, metadata: Option<ProcessMetadata>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            metadata,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorDescriptor> {
        self.error.as_ref()
    }

    pub fn metadata(&self) -> Option<&ProcessMetadata> {
        self.metadata.as_ref()
    }

    /// Convert into a plain `Result`, dropping the metadata
    pub fn into_result(self) -> Result<T, ErrorDescriptor> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ErrorDescriptor::new(
                ErrorKind::InternalComputationError,
                "result carried neither data nor error",
            )),
        }
    }
}
