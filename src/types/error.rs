//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Severity
//!
//! - **Fatal**: missing required tool, declined overwrite, filesystem
//!   failures during rendering — the run stops with a non-zero status
//! - **Non-fatal**: unrecognized tech-stack tokens and (under the default
//!   policy) external process failures — surfaced as warnings, never as
//!   values of this type
//!
//! ## Design Principles
//!
//! - Single unified error type (ForgeError) for the entire application
//! - Structured variants with context for actionable messages
//! - No panic/unwrap in non-test code

use std::path::PathBuf;
use thiserror::Error;

/// Application result type
pub type Result<T> = std::result::Result<T, ForgeError>;

#[derive(Debug, Error)]
pub enum ForgeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    /// A required external tool is absent and the operator declined to
    /// install it
    #[error("Required tool '{tool}' is not available. {hint}")]
    MissingTool { tool: String, hint: String },

    /// The destination exists, is not empty, and overwrite was declined
    #[error("Target directory '{0}' already contains files and overwrite was declined")]
    TargetConflict(PathBuf),

    /// An external collaborator process failed under the report-and-abort
    /// policy
    #[error("{operation} failed: {message}")]
    Process { operation: String, message: String },

    /// Filesystem failure while writing a rendered artifact
    #[error("Failed to write {artifact}: {source}")]
    Render {
        artifact: String,
        #[source]
        source: std::io::Error,
    },
}

impl ForgeError {
    /// Create a process failure error
    pub fn process(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Process {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a render failure error for a named artifact
    pub fn render(artifact: impl Into<String>, source: std::io::Error) -> Self {
        Self::Render {
            artifact: artifact.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_conflict_message_names_path() {
        let err = ForgeError::TargetConflict(PathBuf::from("/tmp/widgets"));
        let msg = err.to_string();
        assert!(msg.contains("/tmp/widgets"));
        assert!(msg.contains("overwrite was declined"));
    }

    #[test]
    fn test_missing_tool_message_carries_hint() {
        let err = ForgeError::MissingTool {
            tool: "code".to_string(),
            hint: "Install the editor CLI and re-run.".to_string(),
        };
        assert!(err.to_string().contains("code"));
        assert!(err.to_string().contains("re-run"));
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(ForgeError::Io(_))));
    }
}
