//! Out-of-band data messages.
//!
//! Rooms carry a small side channel alongside audio, scoped by topic. The
//! platform uses two topics: `lang` (client → agent language announcements)
//! and `transcript` (agent → client text fragments).

use serde::{Deserialize, Serialize};

/// Topic for language announcements published by the local participant.
pub const TOPIC_LANG: &str = "lang";

/// Topic for transcript fragments published by the remote agent.
pub const TOPIC_TRANSCRIPT: &str = "transcript";

/// A single out-of-band message delivered over a room's side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMessage {
    /// Topic label scoping the message.
    pub topic: String,
    /// Identity of the publishing participant.
    pub sender: String,
    /// Raw payload bytes. Both platform topics carry UTF-8 text.
    pub payload: Vec<u8>,
}

impl DataMessage {
    pub fn new(topic: impl Into<String>, sender: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            topic: topic.into(),
            sender: sender.into(),
            payload,
        }
    }

    /// The payload decoded as strict UTF-8, if valid.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}
