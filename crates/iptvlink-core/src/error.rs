//! Error types for iptvlink tooling
//!
//! Provides a single error enum with human-readable messages shared by
//! every tool in the crate.

use thiserror::Error;

/// Error type for all iptvlink operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response or file body was not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON root was not the expected array
    #[error("Root JSON is not a list, it is: {0}")]
    InvalidRoot(String),

    /// Remote resource or local file not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Portal handshake did not yield a token
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// Expected field missing from a response
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// External image conversion failed
    #[error("Image conversion failed: {0}")]
    Conversion(String),
}

/// Result type alias for iptvlink operations
pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_root() {
        let error = ToolError::InvalidRoot("object".to_string());
        assert_eq!(error.to_string(), "Root JSON is not a list, it is: object");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ToolError::NotFound("movies.txt".to_string());
        assert_eq!(error.to_string(), "Not found: movies.txt");
    }

    #[test]
    fn test_error_display_status() {
        let error = ToolError::Status {
            status: 503,
            url: "http://localhost/load.php".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 503 for http://localhost/load.php");
    }

    #[test]
    fn test_error_display_handshake() {
        let error = ToolError::Handshake("token not found".to_string());
        assert_eq!(error.to_string(), "Handshake failed: token not found");
    }

    #[test]
    fn test_error_display_missing_field() {
        let error = ToolError::MissingField("js".to_string());
        assert_eq!(error.to_string(), "Missing field in response: js");
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let error = ToolError::InvalidArgument("parts must be positive".to_string());
        assert_eq!(error.to_string(), "Invalid argument: parts must be positive");
    }

    #[test]
    fn test_error_display_conversion() {
        let error = ToolError::Conversion("sips exited with 1".to_string());
        assert_eq!(error.to_string(), "Image conversion failed: sips exited with 1");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ToolError = json_err.into();
        assert!(error.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: ToolError = io_err.into();
        assert_eq!(error.to_string(), "I/O error: gone");
    }
}
