//! Health endpoints for service monitoring.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use courtside_core::Sport;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::server::AppState;

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Cached roster sizes per sport.
    pub rosters: Vec<RosterHealth>,
}

/// Cache state for one sport.
#[derive(Debug, Serialize)]
pub struct RosterHealth {
    /// Sport category.
    pub sport: Sport,
    /// Players in the valid cache entry; `null` when absent or expired.
    pub cached_players: Option<usize>,
}

/// Health check endpoint handler.
///
/// The service has no hard dependency that can take it down, so the
/// status is always healthy; the roster section shows which caches are
/// currently warm.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut rosters = Vec::with_capacity(Sport::ALL.len());
    for sport in Sport::ALL {
        rosters.push(RosterHealth {
            sport,
            cached_players: state.roster.cached_len(sport).await,
        });
    }

    debug!("Health check completed");

    Json(HealthResponse { status: "healthy", version: env!("CARGO_PKG_VERSION"), rosters })
}

/// Liveness check endpoint.
///
/// Minimal check that the HTTP server is responding; touches no external
/// dependency.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "alive",
        "service": "courtside",
    });

    (StatusCode::OK, Json(response))
}
