//! Error types module
//!
//! Every failure the upload workflow can surface is a `WorkflowError`.
//! Variants fall into the groups the front-end renders differently:
//! user-input errors (blocking notice, no state change), remote or transport
//! errors (status message or notice) and malformed responses.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing selection
    Debug,
    /// Warning level - for rejected input such as a filtered file type
    Warn,
    /// Error level - for remote and transport failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("No job ID available")]
    NoJobId,

    #[error("No video uploaded yet")]
    NoVideoKey,

    #[error("Conversion is not complete yet")]
    ConversionIncomplete,

    #[error("File rejected: {0}")]
    FileRejected(String),

    #[error("Request failed with status code {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl WorkflowError {
    /// Whether the error was caused by the user acting before a precondition
    /// held. These never reach the network and never change session state.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            WorkflowError::NoFileSelected
                | WorkflowError::NoJobId
                | WorkflowError::NoVideoKey
                | WorkflowError::ConversionIncomplete
                | WorkflowError::FileRejected(_)
        )
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            WorkflowError::NoFileSelected
            | WorkflowError::NoJobId
            | WorkflowError::NoVideoKey
            | WorkflowError::ConversionIncomplete => LogLevel::Debug,
            WorkflowError::FileRejected(_) | WorkflowError::Config(_) => LogLevel::Warn,
            WorkflowError::Remote { .. }
            | WorkflowError::Transport(_)
            | WorkflowError::InvalidResponse(_)
            | WorkflowError::Io(_) => LogLevel::Error,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        WorkflowError::InvalidResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_input_errors_are_classified() {
        assert!(WorkflowError::NoFileSelected.is_user_input());
        assert!(WorkflowError::NoJobId.is_user_input());
        assert!(WorkflowError::NoVideoKey.is_user_input());
        assert!(WorkflowError::ConversionIncomplete.is_user_input());
        assert!(WorkflowError::FileRejected("x".into()).is_user_input());
        assert!(!WorkflowError::Transport("reset".into()).is_user_input());
        assert!(!WorkflowError::invalid_response("missing key").is_user_input());
    }

    #[test]
    fn remote_error_message_includes_status() {
        let err = WorkflowError::Remote {
            status: 403,
            body: "SignatureDoesNotMatch".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 403: SignatureDoesNotMatch"
        );
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn io_errors_convert() {
        let err: WorkflowError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, WorkflowError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
