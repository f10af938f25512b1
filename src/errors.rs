//! Error types for the qapflow CLI
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for qapflow operations
pub type Result<T> = std::result::Result<T, QapError>;

/// Main error type for all qapflow operations
#[derive(Debug, Error)]
pub enum QapError {
    /// Store not found - no .qapflow directory in this tree
    #[error("QAP store not found: {0}")]
    StoreNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// No record with the given id
    #[error("QAP record not found: {0}")]
    RecordNotFound(String),

    /// No registered user with the given username
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// User is not allowed to act on the record
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Workflow transition not valid for the record's current state
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Bad command-line argument value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QapError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            QapError::StoreNotFound(_) => "STORE_NOT_FOUND",
            QapError::InvalidJson(_) => "INVALID_JSON",
            QapError::FileNotFound(_) => "FILE_NOT_FOUND",
            QapError::RecordNotFound(_) => "RECORD_NOT_FOUND",
            QapError::UnknownUser(_) => "UNKNOWN_USER",
            QapError::AccessDenied(_) => "ACCESS_DENIED",
            QapError::InvalidTransition(_) => "INVALID_TRANSITION",
            QapError::InvalidArgument(_) => "INVALID_ARGUMENT",
            QapError::ConfigError(_) => "CONFIG_ERROR",
            QapError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &QapError) -> i32 {
    match error {
        QapError::AccessDenied(_) => 2,
        QapError::InvalidTransition(_) => 3,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(QapError::StoreNotFound("test".into()).code(), "STORE_NOT_FOUND");
        assert_eq!(QapError::InvalidJson("test".into()).code(), "INVALID_JSON");
        assert_eq!(QapError::FileNotFound("test".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(QapError::RecordNotFound("test".into()).code(), "RECORD_NOT_FOUND");
        assert_eq!(QapError::UnknownUser("test".into()).code(), "UNKNOWN_USER");
        assert_eq!(QapError::AccessDenied("test".into()).code(), "ACCESS_DENIED");
        assert_eq!(QapError::InvalidTransition("test".into()).code(), "INVALID_TRANSITION");
        assert_eq!(QapError::InvalidArgument("test".into()).code(), "INVALID_ARGUMENT");
        assert_eq!(QapError::ConfigError("test".into()).code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&QapError::AccessDenied("test".into())), 2);
        assert_eq!(to_exit_code(&QapError::InvalidTransition("test".into())), 3);
        assert_eq!(to_exit_code(&QapError::RecordNotFound("test".into())), 1);
        assert_eq!(to_exit_code(&QapError::ConfigError("test".into())), 1);
    }

    #[test]
    fn test_error_display() {
        let err = QapError::AccessDenied("role 'head' cannot act at level 2".into());
        assert!(err.to_string().contains("Access denied"));
        assert!(err.to_string().contains("level 2"));
    }
}
