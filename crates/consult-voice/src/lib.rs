//! LiveKit credential service for the consult platform.
//!
//! Wraps LiveKit access-token minting: given a room name and a participant
//! identity, produces a short-lived signed JWT granting join, publish,
//! subscribe, and data-publish rights on that room. Audio transport and
//! media negotiation are entirely LiveKit's concern; this crate only issues
//! the credential that lets a participant in.

pub mod config;
pub mod error;
pub mod service;

pub use config::LiveKitConfig;
pub use error::VoiceError;
pub use service::VoiceService;
