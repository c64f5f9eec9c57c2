//! API error types

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::ApiClient) calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Response status outside of `200..=299`
    ///
    /// The response body is never read for this variant.
    #[error("HTTP error! Status: {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },
    /// Success response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Request cancelled by the caller's cancellation token
    #[error("Request cancelled")]
    Cancelled,
    /// Header name or value rejected before sending
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// Credential storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
    /// Value that cannot be parsed or encoded, such as an unknown ticket status
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// Client build error
    #[error("Client build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Build(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status: status.as_u16(),
            }
        } else {
            ApiError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_contains_code() {
        let error = ApiError::Status { status: 404 };
        assert_eq!(error.to_string(), "HTTP error! Status: 404");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        assert_eq!(ApiError::Timeout.status(), None);
        assert_eq!(ApiError::Cancelled.status(), None);
        assert_eq!(ApiError::Decode("eof".to_string()).status(), None);
    }

    #[test]
    fn test_invalid_value_display() {
        let error = ApiError::InvalidValue("Unknown status: done".to_string());
        assert_eq!(error.to_string(), "Invalid value: Unknown status: done");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_cancelled_display() {
        assert_eq!(ApiError::Cancelled.to_string(), "Request cancelled");
    }

    #[test]
    fn test_from_serde_json_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let json_error = result.expect_err("Invalid JSON should produce an error");
        let api_error: ApiError = json_error.into();

        match api_error {
            ApiError::Decode(msg) => assert!(msg.contains("key must be a string")),
            _ => panic!("Expected ApiError::Decode"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let api_error: ApiError = io_error.into();
        assert!(matches!(api_error, ApiError::Storage(ref msg) if msg == "denied"));
    }
}
