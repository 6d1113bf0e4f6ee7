//! Agent configuration profile.
//!
//! A static key→value description of the remote agent's speech pipeline,
//! rendered read-only in the UI shell. It is purely informative and never
//! derived from live agent state.

use serde::{Deserialize, Serialize};

/// Default LLM model name shown when no override is configured.
pub const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";

/// Read-only display profile for the remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AgentProfile {
    /// Domain the agent is restricted to.
    pub domain: String,
    /// Voice-activity-detection method.
    pub vad: String,
    /// Speech-to-text provider(s).
    pub stt: String,
    /// Language-model provider and model name.
    pub llm: String,
    /// Text-to-speech provider(s).
    pub tts: String,
    /// Whether turn detection is enabled.
    pub turn_detection: bool,
    /// Whether noise cancellation is enabled.
    pub noise_cancellation: bool,
}

impl AgentProfile {
    /// Builds the standard profile, with `model` overriding the displayed
    /// LLM model name.
    pub fn with_model(model: Option<&str>) -> Self {
        Self {
            domain: "UK Immigration only".to_string(),
            vad: "SILERO".to_string(),
            stt: "GROQ / Deepgram".to_string(),
            llm: format!("GROQ {}", model.unwrap_or(DEFAULT_LLM_MODEL)),
            tts: "ElevenLabs / OpenAI Realtime / LiveKit TTS".to_string(),
            turn_detection: true,
            noise_cancellation: true,
        }
    }
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self::with_model(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_uses_default_model() {
        let profile = AgentProfile::default();
        assert_eq!(profile.llm, format!("GROQ {}", DEFAULT_LLM_MODEL));
    }

    #[test]
    fn model_override_changes_llm_entry() {
        let profile = AgentProfile::with_model(Some("llama-3.3-70b-versatile"));
        assert_eq!(profile.llm, "GROQ llama-3.3-70b-versatile");
    }

    #[test]
    fn serializes_with_screaming_keys() {
        let json = serde_json::to_value(AgentProfile::default()).unwrap();
        assert_eq!(json["DOMAIN"], "UK Immigration only");
        assert_eq!(json["VAD"], "SILERO");
        assert_eq!(json["TURN_DETECTION"], true);
    }
}
