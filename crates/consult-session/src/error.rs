use thiserror::Error;

/// Errors surfaced by the call session and its ports.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Credential fetch failed: network error, non-2xx response, or a
    /// malformed response body.
    #[error("credential fetch failed: {0}")]
    Credential(String),

    /// Room join or data-channel operation failed in the transport.
    #[error("room transport error: {0}")]
    Transport(String),
}
