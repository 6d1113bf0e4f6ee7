//! Client-side call session for the consult platform.
//!
//! Drives the `idle → connecting → in-call` lifecycle of a voice call
//! against a remote AI agent: fetches a room-join credential, joins the
//! room through a transport port, announces the caller's spoken language
//! over the `lang` data-channel topic, and accumulates agent transcript
//! fragments into a bounded display buffer.
//!
//! External capabilities are consumed as ports: [`CredentialIssuer`] for
//! token issuance and [`RoomTransport`] for room membership. A production
//! deployment wires in [`HttpCredentialIssuer`] against the consult server
//! and a transport wrapping the LiveKit client SDK; [`LocalRoom`] provides
//! an in-process loopback transport for development and tests.

pub mod credentials;
pub mod error;
pub mod session;
pub mod transcript;
pub mod transport;

pub use credentials::{random_identity, CredentialIssuer, HttpCredentialIssuer};
pub use error::SessionError;
pub use session::{CallSession, SessionEvent};
pub use transcript::{TranscriptBuffer, TRANSCRIPT_CAPACITY};
pub use transport::{LocalRoom, RoomConnection, RoomTransport};
