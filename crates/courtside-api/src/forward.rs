//! Relay of command payloads to the workflow-automation endpoint.
//!
//! The original raw body is passed through verbatim, never re-serialized.
//! Delivery is at-most-once with no retry: the dispatcher spawns a
//! detached task and the acknowledgment has already been returned by the
//! time the forward completes, so failures surface only in logs.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info_span, warn, Instrument};

/// Configuration for the automation forwarder.
#[derive(Debug, Clone)]
pub struct ForwardConfig {
    /// Automation endpoint URL; empty disables forwarding.
    pub url: String,
    /// Application identifier sent in the `X-Application-Id` header.
    pub application_id: String,
    /// Timeout for the forward request.
    pub timeout: Duration,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self { url: String::new(), application_id: String::new(), timeout: Duration::from_secs(10) }
    }
}

/// Errors produced by a forward attempt.
///
/// Only ever observed in logs; nothing upstream consumes them.
#[derive(Debug, Clone, Error)]
pub enum ForwardError {
    /// No forward URL configured.
    #[error("forward URL not configured")]
    NotConfigured,

    /// Network-level failure reaching the automation endpoint.
    #[error("forward request failed: {message}")]
    Network {
        /// Error message describing the failure
        message: String,
    },

    /// Automation endpoint answered with a non-success status.
    #[error("automation endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code returned
        status: u16,
    },

    /// HTTP client could not be built.
    #[error("invalid forwarder configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

/// HTTP client for the automation endpoint.
#[derive(Debug)]
pub struct Forwarder {
    client: reqwest::Client,
    config: ForwardConfig,
}

impl Forwarder {
    /// Creates a forwarder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForwardError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn new(config: ForwardConfig) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build().map_err(|e| {
            ForwardError::Configuration { message: format!("failed to build HTTP client: {e}") }
        })?;

        Ok(Self { client, config })
    }

    /// Whether a forward URL is configured.
    pub fn is_configured(&self) -> bool {
        !self.config.url.trim().is_empty()
    }

    /// Forwards the raw payload and waits for the response status.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without a URL, `Network` on transport
    /// failure, or `Status` on a non-success response.
    pub async fn forward(&self, body: Bytes) -> Result<u16, ForwardError> {
        if !self.is_configured() {
            return Err(ForwardError::NotConfigured);
        }

        let span = info_span!("forward", url = %self.config.url, bytes = body.len());

        async move {
            let response = self
                .client
                .post(&self.config.url)
                .header("content-type", "application/json")
                .header("X-Application-Id", &self.config.application_id)
                .header("X-Forwarded-At", chrono::Utc::now().to_rfc3339())
                .body(body)
                .send()
                .await
                .map_err(|e| ForwardError::Network { message: e.to_string() })?;

            let status = response.status();
            if status.is_success() {
                debug!(status = status.as_u16(), "Payload forwarded");
                Ok(status.as_u16())
            } else {
                Err(ForwardError::Status { status: status.as_u16() })
            }
        }
        .instrument(span)
        .await
    }

    /// Forwards the payload as a detached task.
    ///
    /// Returns immediately. Failures are logged and never reach the
    /// caller's return path; delivery is at-most-once with no retry.
    pub fn forward_detached(self: Arc<Self>, body: Bytes) {
        tokio::spawn(async move {
            if let Err(e) = self.forward(body).await {
                warn!(error = %e, "Detached forward failed; payload dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_string, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn forwarder_for(server: &MockServer) -> Arc<Forwarder> {
        Arc::new(
            Forwarder::new(ForwardConfig {
                url: format!("{}/automation", server.uri()),
                application_id: "app-42".to_string(),
                ..ForwardConfig::default()
            })
            .expect("forwarder should build"),
        )
    }

    #[tokio::test]
    async fn payload_forwarded_verbatim_with_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/automation"))
            .and(header("content-type", "application/json"))
            .and(header("X-Application-Id", "app-42"))
            .and(body_string(r#"{"type":2,"data":{"name":"nflstats"}}"#))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let status = forwarder
            .forward(Bytes::from_static(br#"{"type":2,"data":{"name":"nflstats"}}"#))
            .await
            .expect("forward should succeed");

        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn non_success_status_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        let result = forwarder.forward(Bytes::from_static(b"{}")).await;

        match result {
            Err(ForwardError::Status { status }) => assert_eq!(status, 500),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unconfigured_forwarder_refuses() {
        let forwarder =
            Forwarder::new(ForwardConfig::default()).expect("forwarder should build");

        let result = forwarder.forward(Bytes::from_static(b"{}")).await;
        assert!(matches!(result, Err(ForwardError::NotConfigured)));
    }

    #[tokio::test]
    async fn detached_forward_delivers_in_background() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/automation"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let forwarder = forwarder_for(&server);
        forwarder.forward_detached(Bytes::from_static(b"{\"type\":2}"));

        // The spawn carries no completion handle; poll the mock instead.
        for _ in 0..40 {
            if !server.received_requests().await.unwrap_or_default().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("detached forward never reached the automation endpoint");
    }
}
