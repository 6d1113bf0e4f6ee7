//! Call lifecycle state.

use serde::{Deserialize, Serialize};

/// State of a call session.
///
/// Transitions are strictly forward (`Idle → Connecting → InCall`) except
/// for error recovery, which returns `Connecting → Idle` with the failure
/// recorded on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallState {
    /// No call in progress; the start action is available.
    #[default]
    Idle,
    /// A credential fetch or room join is in flight.
    Connecting,
    /// Connected to the room; audio and data channels are live.
    InCall,
}

impl CallState {
    /// Whether a start attempt is already in flight or completed.
    pub fn is_active(&self) -> bool {
        !matches!(self, CallState::Idle)
    }
}
