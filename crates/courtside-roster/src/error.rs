//! Error types for sports-data API operations.
//!
//! Categorizes network failures, HTTP status errors, and decode problems.
//! No operation in this crate retries; categorization exists for logging
//! and for callers deciding how to degrade.

use thiserror::Error;

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Error conditions for roster fetch and player search.
#[derive(Debug, Clone, Error)]
pub enum RosterError {
    /// Network-level connectivity failure.
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out
        timeout_seconds: u64,
    },

    /// HTTP response indicated client error (4xx).
    #[error("client error: HTTP {status}")]
    ClientError {
        /// HTTP status code (4xx)
        status: u16,
        /// Response body content
        body: String,
    },

    /// HTTP response indicated server error (5xx).
    #[error("server error: HTTP {status}")]
    ServerError {
        /// HTTP status code (5xx)
        status: u16,
        /// Response body content
        body: String,
    },

    /// Response body could not be decoded as the expected JSON shape.
    #[error("response decode failed: {message}")]
    Decode {
        /// Decode error message
        message: String,
    },

    /// Invalid client configuration.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl RosterError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a client error from an HTTP response.
    pub fn client_error(status: u16, body: impl Into<String>) -> Self {
        Self::ClientError { status, body: body.into() }
    }

    /// Creates a server error from an HTTP response.
    pub fn server_error(status: u16, body: impl Into<String>) -> Self {
        Self::ServerError { status, body: body.into() }
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether the failure is plausibly transient.
    ///
    /// Nothing in this service retries, but log consumers use the
    /// distinction to separate upstream weather from our own bugs.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::ServerError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_identified() {
        assert!(RosterError::network("connection refused").is_transient());
        assert!(RosterError::timeout(10).is_transient());
        assert!(RosterError::server_error(503, "unavailable").is_transient());

        assert!(!RosterError::client_error(401, "bad key").is_transient());
        assert!(!RosterError::decode("missing data field").is_transient());
        assert!(!RosterError::configuration("empty base url").is_transient());
    }

    #[test]
    fn error_display_format() {
        assert_eq!(RosterError::timeout(10).to_string(), "request timeout after 10s");
        assert_eq!(
            RosterError::client_error(429, "slow down").to_string(),
            "client error: HTTP 429"
        );
    }
}
