//! Shared types for the consult platform.
//!
//! Plain data definitions used across the credential service, the client
//! session library, and the HTTP server: spoken-language codes, call
//! lifecycle states, out-of-band data messages, and the read-only agent
//! profile shown in the UI shell.

pub mod agent;
pub mod lang;
pub mod message;
pub mod state;

pub use agent::{AgentProfile, DEFAULT_LLM_MODEL};
pub use lang::{Lang, LangParseError};
pub use message::{DataMessage, TOPIC_LANG, TOPIC_TRANSCRIPT};
pub use state::CallState;
