//! Shared test environment for Courtside integration tests.
//!
//! Stands up mock sports-data and automation servers, generates a fresh
//! Ed25519 keypair, and wires an [`AppState`] whose external URLs point at
//! the mocks. Tests sign payloads with [`TestEnv::sign`] and drive either
//! the router directly or a served socket.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use courtside_api::{create_router, AppState, ForwardConfig, Forwarder};
use courtside_core::{Sport, TestClock};
use courtside_roster::{ClientConfig, RosterCache, SportsClient};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Default roster TTL used by harness-built caches.
pub const TEST_ROSTER_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Complete test environment around one application state.
pub struct TestEnv {
    /// Mock sports-data API server.
    pub sports_api: MockServer,
    /// Mock workflow-automation server; forwards land on `/automation`.
    pub automation: MockServer,
    /// Controllable clock driving roster cache expiry.
    pub clock: TestClock,
    signing_key: SigningKey,
    state: AppState,
}

impl TestEnv {
    /// Creates a fresh environment with its own mocks and keypair.
    pub async fn new() -> Self {
        let sports_api = MockServer::start().await;
        let automation = MockServer::start().await;
        let clock = TestClock::new();
        let signing_key = SigningKey::generate(&mut OsRng);

        let client = SportsClient::new(ClientConfig {
            base_url: sports_api.uri(),
            api_key: "test-key".to_string(),
            ..ClientConfig::default()
        })
        .expect("harness client should build");

        let roster =
            Arc::new(RosterCache::new(client, Arc::new(clock.clone()), TEST_ROSTER_TTL));

        let forwarder = Arc::new(
            Forwarder::new(ForwardConfig {
                url: format!("{}/automation", automation.uri()),
                application_id: "test-app".to_string(),
                ..ForwardConfig::default()
            })
            .expect("harness forwarder should build"),
        );

        let state =
            AppState { verifying_key: Some(signing_key.verifying_key()), roster, forwarder };

        Self { sports_api, automation, clock, signing_key, state }
    }

    /// Builds a router over this environment's state.
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), Duration::from_secs(15))
    }

    /// Serves the router on an ephemeral port and returns the bound
    /// address. The server task runs until the test process exits.
    pub async fn serve(&self) -> SocketAddr {
        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind should succeed");
        let addr = listener.local_addr().expect("local addr should resolve");

        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        addr
    }

    /// Signs `timestamp ‖ body` with the environment's key, hex-encoded.
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(self.signing_key.sign(&message).to_bytes())
    }

    /// Mounts a single-page roster listing for a sport.
    pub async fn mount_roster(&self, sport: Sport, rows: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path(format!("{}/players", sport.api_path())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": rows,
                "meta": {}
            })))
            .mount(&self.sports_api)
            .await;
    }

    /// Mounts a search response for a sport and query.
    pub async fn mount_search(&self, sport: Sport, query: &str, rows: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path(format!("{}/players", sport.api_path())))
            .and(query_param("search", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": rows,
                "meta": {}
            })))
            .mount(&self.sports_api)
            .await;
    }

    /// Mounts a 200 response on the automation endpoint.
    pub async fn mount_automation_ok(&self) {
        Mock::given(method("POST"))
            .and(path("/automation"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.automation)
            .await;
    }

    /// Bodies of requests the automation endpoint has received so far.
    pub async fn forwarded_bodies(&self) -> Vec<String> {
        self.automation
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }
}

/// Builds one sports-data API player row.
pub fn player_row(id: i64, name: &str, team: &str, position: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "position": position,
        "team": {"abbreviation": team}
    })
}
