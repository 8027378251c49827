//! Error types for CourseHub

use thiserror::Error;

/// Main error type for CourseHub operations
#[derive(Error, Debug)]
pub enum CourseHubError {
    /// A required field was missing or empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown course or user id
    #[error("Not found: {0}")]
    NotFound(String),

    /// The actor's role does not allow the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Login with an unknown email
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Backing file could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Backing file is not a valid course list
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for CourseHub operations
pub type Result<T> = std::result::Result<T, CourseHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = CourseHubError::Validation("missing title".to_string());
        assert_eq!(err.to_string(), "Validation error: missing title");

        let err = CourseHubError::NotFound("course 42".to_string());
        assert_eq!(err.to_string(), "Not found: course 42");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "courses.json");
        let err: CourseHubError = io.into();
        assert!(matches!(err, CourseHubError::Storage(_)));
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: CourseHubError = serde_err.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
