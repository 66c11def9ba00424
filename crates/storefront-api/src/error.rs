//! Error types for shop API calls.

use thiserror::Error;

/// Errors returned by a [`ShopApi`](crate::ShopApi)
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error text from the response body, or the status reason
        message: String,
    },

    /// The configured base URL is not usable
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ApiError::status(400, "Order total mismatch");
        assert_eq!(err.to_string(), "Server returned 400: Order total mismatch");
    }

    #[test]
    fn test_url_conversion() {
        let parse_err = url::Url::parse("::").unwrap_err();
        let err: ApiError = parse_err.into();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
