//! Timetable API error types

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while calling the Timetable API
#[derive(Debug, Error)]
pub enum PtvError {
    /// The service answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code as returned by the service
        status: u16,
        /// Raw response body, kept verbatim
        body: String,
    },

    /// The response body was not a JSON object
    #[error("Decode error: {0}")]
    Decode(String),

    /// Connection to the Timetable API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The request could not be built from the given arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error payload the service sends alongside 4xx/5xx statuses
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

impl PtvError {
    /// HTTP status code, if the service answered at all
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the service rejected the developer id or signature
    #[must_use]
    pub const fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }

    /// Returns true if the same request may succeed when sent again.
    ///
    /// The client never retries on its own; this only classifies the error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The `message` field of the service's error payload, if present
    #[must_use]
    pub fn service_message(&self) -> Option<String> {
        let Self::Http { body, .. } = self else {
            return None;
        };
        serde_json::from_str::<ServiceErrorBody>(body)
            .ok()
            .map(|payload| payload.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> PtvError {
        PtvError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_status_code() {
        assert_eq!(http(404, "").status_code(), Some(404));
        assert_eq!(PtvError::Decode("eof".to_string()).status_code(), None);
    }

    #[test]
    fn test_authentication_failure() {
        assert!(http(403, "").is_authentication_failure());
        assert!(http(401, "").is_authentication_failure());
        assert!(!http(400, "").is_authentication_failure());
        assert!(!PtvError::Timeout { timeout_secs: 5 }.is_authentication_failure());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(PtvError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(PtvError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(http(503, "").is_retryable());
        assert!(http(429, "").is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!http(403, "").is_retryable());
        assert!(!http(404, "").is_retryable());
        assert!(!PtvError::Decode("bad".to_string()).is_retryable());
        assert!(!PtvError::InvalidRequest("blank".to_string()).is_retryable());
        assert!(!PtvError::Configuration("empty".to_string()).is_retryable());
    }

    #[test]
    fn test_service_message() {
        let err = http(
            403,
            r#"{"message":"Forbidden resource","status":{"version":"3.0","health":1}}"#,
        );
        assert_eq!(err.service_message().as_deref(), Some("Forbidden resource"));

        assert!(http(500, "<html>oops</html>").service_message().is_none());
        assert!(PtvError::Decode("x".to_string()).service_message().is_none());
    }

    #[test]
    fn test_error_display() {
        let err = http(403, "denied");
        assert_eq!(err.to_string(), "HTTP 403: denied");

        let err = PtvError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
