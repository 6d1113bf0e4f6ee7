//! Credential route: `GET /token`.

use crate::AppState;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Room joined when the client does not name one.
pub const DEFAULT_ROOM: &str = "consult";

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub room: Option<String>,
    pub identity: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Mints one room-join credential per request.
///
/// `room` defaults to [`DEFAULT_ROOM`], `identity` to a random guest
/// identity. Returns `503` when LiveKit credentials are not configured —
/// a partially configured service must never hand out a malformed token.
pub async fn issue_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, (StatusCode, String)> {
    if !state.voice.is_enabled() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({
                "error": "voice_not_configured",
                "message": "Voice is not configured. Set up LiveKit credentials to enable calls.",
                "setup_hint": "Configure livekit.url, livekit.api_key, and livekit.api_secret in config.toml or use the LIVEKIT_* environment variables."
            })
            .to_string(),
        ));
    }

    let room = query
        .room
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROOM.to_string());
    let identity = query
        .identity
        .filter(|i| !i.is_empty())
        .unwrap_or_else(guest_identity);

    let token = state
        .voice
        .generate_join_token(&room, &identity, &identity)
        .map_err(|e| {
            tracing::error!(room = %room, "failed to mint join token: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to mint join token".to_string(),
            )
        })?;

    tracing::info!(room = %room, identity = %identity, "issued join token");
    Ok(Json(TokenResponse { token }))
}

/// Random identity for anonymous guests.
fn guest_identity() -> String {
    format!("u-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_identities_are_prefixed_and_unique() {
        let a = guest_identity();
        assert!(a.starts_with("u-"));
        assert_ne!(a, guest_identity());
    }
}
