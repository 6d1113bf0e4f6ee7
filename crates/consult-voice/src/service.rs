use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use std::time::Duration;
use tracing::debug;

/// Mints LiveKit room-join credentials.
#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    /// Whether the service has everything it needs to mint tokens. Tokens
    /// must never be issued from a partially configured service.
    pub fn is_enabled(&self) -> bool {
        !self.config.url.is_empty()
            && !self.config.api_key.is_empty()
            && !self.config.api_secret.is_empty()
    }

    /// Returns the client-visible LiveKit server URL.
    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    /// Mints a join token for `participant_identity` on `room_name`.
    ///
    /// The grant allows joining the room, publishing and subscribing to
    /// media, and publishing data-channel messages. Validity is bounded by
    /// the configured TTL.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
    ) -> Result<String, VoiceError> {
        if !self.is_enabled() {
            return Err(VoiceError::Config(
                "LiveKit url, api_key and api_secret must all be set".to_string(),
            ));
        }

        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        let jwt = token.to_jwt().map_err(VoiceError::LiveKit)?;
        debug!(
            room = %room_name,
            identity = %participant_identity,
            ttl_seconds = self.config.token_ttl_seconds,
            "minted join token"
        );
        Ok(jwt)
    }
}
