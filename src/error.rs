//! Framework-wide error type.
//!
//! Errors fall into two classes with very different lifecycles:
//!
//! - **Dispatch errors** (`ControllerNotFound`, `MethodNotFound`,
//!   `UnknownDispatch`) are recovered inside the front controller: the
//!   in-flight dispatch is rewritten to target the error controller and the
//!   user still receives a rendered page.
//! - **Storage and configuration errors** propagate with `?` up to the
//!   top-level [`ErrorHandler`](crate::error_handler::ErrorHandler), which
//!   logs them and produces a friendly error page. There is no retry policy;
//!   every failure is terminal for the current request.

use std::path::PathBuf;
use thiserror::Error;

/// Parameter label handed to the error controller on a not-found fallback.
pub const NOT_FOUND_LABEL: &str = "404";

/// Parameter label handed to the error controller on an unclassified failure.
pub const UNKNOWN_ERROR_LABEL: &str = "Unknown Error";

#[derive(Debug, Error)]
pub enum FrameworkError {
    /// No controller is registered (or discoverable) under the given name.
    #[error("no controller registered for `{name}`")]
    ControllerNotFound { name: String },

    /// The resolved controller does not expose the requested method.
    #[error("controller `{controller}` has no method `{method}`")]
    MethodNotFound { controller: String, method: String },

    /// Dispatch failed for a reason outside the 404 classification.
    #[error("dispatch failed: {0}")]
    UnknownDispatch(String),

    /// A storage file existed but its contents could not be decoded.
    #[error("failed to decode {format} file `{path}`: {reason}")]
    StorageDecode {
        format: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// The storage backend has no encoder for this format.
    #[error("{format} storage does not support encoding")]
    EncodingUnsupported { format: &'static str },

    /// A pseudo-boolean string was neither `"true"` nor `"false"`.
    #[error("cannot convert `{value}` to boolean, expected \"true\" or \"false\"")]
    BooleanConversion { value: String },

    /// A storage file named by key or path does not exist.
    #[error("storage file `{path}` does not exist")]
    StorageFileMissing { path: PathBuf },

    /// A data or controller directory could not be listed.
    #[error("directory `{path}` is unreadable")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FrameworkError {
    /// Numeric reference code carried into log lines.
    ///
    /// Dispatch-level errors use their HTTP-ish classification; storage
    /// errors keep the historical 1xxx reference codes.
    pub fn code(&self) -> u16 {
        match self {
            FrameworkError::ControllerNotFound { .. } => 404,
            FrameworkError::MethodNotFound { .. } => 404,
            FrameworkError::UnknownDispatch(_) => 500,
            FrameworkError::StorageDecode { .. } => 1001,
            FrameworkError::EncodingUnsupported { .. } => 1002,
            FrameworkError::BooleanConversion { .. } => 1003,
            FrameworkError::StorageFileMissing { .. } => 1004,
            FrameworkError::DirectoryUnreadable { .. } => 1005,
        }
    }

    /// True for errors the front controller absorbs via the error-controller
    /// fallback instead of propagating.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FrameworkError::ControllerNotFound { .. }
                | FrameworkError::MethodNotFound { .. }
                | FrameworkError::UnknownDispatch(_)
        )
    }

    /// Label passed as the error controller's single parameter when this
    /// error triggers the fallback path.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            FrameworkError::ControllerNotFound { .. } | FrameworkError::MethodNotFound { .. } => {
                NOT_FOUND_LABEL
            }
            _ => UNKNOWN_ERROR_LABEL,
        }
    }
}
