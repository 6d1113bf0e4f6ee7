//! Credential issuance port.
//!
//! A credential is an opaque signed token authorizing one identity to join
//! one room. The session fetches exactly one credential per start attempt
//! and never retries; any failure surfaces as a human-readable message on
//! the session.

use crate::error::SessionError;
use async_trait::async_trait;
use serde::Deserialize;

/// Port for obtaining a room-join credential.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Issues a join token for `identity` on `room`.
    async fn issue(&self, room: &str, identity: &str) -> Result<String, SessionError>;
}

/// Generates a fresh random participant identity for one start attempt.
pub fn random_identity() -> String {
    format!("web-{}", uuid::Uuid::new_v4().simple())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// [`CredentialIssuer`] backed by the consult server's `GET /token` route.
#[derive(Debug, Clone)]
pub struct HttpCredentialIssuer {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCredentialIssuer {
    /// Creates an issuer against `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CredentialIssuer for HttpCredentialIssuer {
    async fn issue(&self, room: &str, identity: &str) -> Result<String, SessionError> {
        let url = format!("{}/token", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("room", room), ("identity", identity)])
            .send()
            .await
            .map_err(|e| SessionError::Credential(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Credential(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| SessionError::Credential(format!("malformed token response: {e}")))?;

        if body.token.is_empty() {
            return Err(SessionError::Credential(
                "token endpoint returned an empty token".to_string(),
            ));
        }

        Ok(body.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_identity_is_prefixed_and_unique() {
        let a = random_identity();
        let b = random_identity();
        assert!(a.starts_with("web-"));
        assert_ne!(a, b);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let issuer = HttpCredentialIssuer::new("http://localhost:3000/");
        assert_eq!(issuer.base_url, "http://localhost:3000");
    }
}
