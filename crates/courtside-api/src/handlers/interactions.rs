//! Interaction dispatch handler.
//!
//! Verifies request authenticity, then routes on the payload type: ping
//! gets a pong, autocomplete resolves locally, everything else is
//! acknowledged with a deferred ephemeral response while the raw payload
//! is forwarded downstream as a detached task.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use courtside_core::{Interaction, InteractionResponse, InteractionType};
use tracing::{debug, instrument, warn};

use crate::{autocomplete, server::AppState, verify::verify_signature};

/// Header carrying the hex-encoded request signature.
const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Header carrying the signed timestamp.
const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Handles a signed interaction POST.
///
/// Authentication failures stop processing with 401 before any downstream
/// call; malformed JSON is a 400; every other path returns a 200 with one
/// of the three response shapes.
#[instrument(name = "interaction", skip(state, headers, body), fields(content_length = body.len()))]
pub async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Fail closed: no configured key means no request can be authentic.
    let Some(verifying_key) = state.verifying_key.as_ref() else {
        warn!("No verification key configured; rejecting request");
        return unauthorized();
    };

    let Some((signature, timestamp)) = auth_headers(&headers) else {
        warn!("Missing signature headers");
        return unauthorized();
    };

    if let Err(e) = verify_signature(verifying_key, signature, timestamp, &body) {
        warn!(error = %e, "Request signature rejected");
        return unauthorized();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!(error = %e, "Malformed interaction payload");
            return (StatusCode::BAD_REQUEST, "malformed interaction payload").into_response();
        },
    };

    match interaction.kind {
        InteractionType::Ping => {
            debug!("Heartbeat acknowledged");
            Json(InteractionResponse::pong()).into_response()
        },
        InteractionType::Autocomplete => {
            let choices = match &interaction.data {
                Some(data) => match autocomplete::resolve(&state.roster, data).await {
                    Ok(choices) => choices,
                    Err(e) => {
                        // Degrade to an empty list; an error status would
                        // break the typing UI.
                        warn!(error = %e, "Autocomplete lookup failed; returning no choices");
                        Vec::new()
                    },
                },
                None => Vec::new(),
            };

            debug!(choices = choices.len(), "Autocomplete resolved");
            Json(InteractionResponse::autocomplete(choices)).into_response()
        },
        InteractionType::Command | InteractionType::Other(_) => {
            if state.forwarder.is_configured() {
                state.forwarder.clone().forward_detached(body.clone());
            } else {
                debug!("Forward URL not configured; dropping command payload");
            }

            Json(InteractionResponse::deferred_ephemeral()).into_response()
        },
    }
}

/// Fallback for non-POST methods on the interactions route.
pub async fn interactions_method_fallback() -> &'static str {
    "OK"
}

fn auth_headers(headers: &HeaderMap) -> Option<(&str, &str)> {
    let signature = headers.get(SIGNATURE_HEADER)?.to_str().ok()?;
    let timestamp = headers.get(TIMESTAMP_HEADER)?.to_str().ok()?;
    Some((signature, timestamp))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "invalid request signature").into_response()
}
