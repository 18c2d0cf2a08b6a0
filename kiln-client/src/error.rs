//! Error types for the Kiln client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the job server
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server returned a non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response arrived but breaks the server's protocol
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Whether retrying the same call may succeed
    ///
    /// Transport failures, error statuses and unreadable bodies are
    /// transient. Protocol violations and unbuildable requests are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::ApiError { .. } | Self::ParseError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::api_error(503, "busy").is_transient());
        assert!(ClientError::api_error(404, "gone").is_transient());
        assert!(ClientError::ParseError("eof".into()).is_transient());
        assert!(!ClientError::InvalidResponse("no location".into()).is_transient());
        assert!(!ClientError::InvalidRequest("empty job".into()).is_transient());
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::api_error(502, "bad gateway");
        assert!(matches!(err, ClientError::ApiError { status: 502, .. }));
        assert_eq!(err.to_string(), "API error (status 502): bad gateway");
    }
}
