// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for agent tracing.
//!
//! This module provides strongly-typed errors for the recording pipeline,
//! using `thiserror` for ergonomic error definitions and `anyhow` for error
//! propagation at the CLI layer.
//!
//! Best-effort lookups (VCS root, VCS revision, relative paths) never produce
//! errors; they degrade to a safe default instead.

use thiserror::Error;

/// Errors that can occur while appending a persisted record.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to create trace directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("IO error writing trace record: {0}")]
    Io(String),

    #[error("Failed to serialize trace record: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Errors surfaced by the tracer façade.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid trace event: {0}")]
    InvalidEvent(String),

    #[error("Tracer already initialized")]
    AlreadyInitialized,
}

/// Errors that can occur while handling a hook payload.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("Invalid hook input: {0}")]
    InvalidPayload(String),

    #[error("Failed to record hook event: {0}")]
    Trace(#[from] TraceError),
}

impl HookError {
    /// Whether the payload itself was at fault (as opposed to the recording).
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::InvalidJson(_) | Self::InvalidPayload(_))
    }
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let record_err: RecordError = io_err.into();
        assert!(matches!(record_err, RecordError::Io(_)));
        assert!(record_err.to_string().contains("read-only"));
    }

    #[test]
    fn test_trace_error_from_record() {
        let record_err = RecordError::Io("disk full".to_string());
        let trace_err: TraceError = record_err.into();
        assert!(matches!(trace_err, TraceError::Record(_)));
    }

    #[test]
    fn test_hook_error_malformed() {
        assert!(HookError::InvalidJson("eof".to_string()).is_malformed_input());
        assert!(HookError::InvalidPayload("missing field".to_string()).is_malformed_input());

        let trace_err = TraceError::Record(RecordError::Io("disk full".to_string()));
        assert!(!HookError::from(trace_err).is_malformed_input());
    }

    #[test]
    fn test_error_display() {
        let err = RecordError::CreateDir {
            path: "/ro/.agent-trace".to_string(),
            message: "permission denied".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("/ro/.agent-trace"));
        assert!(display.contains("permission denied"));
    }
}
