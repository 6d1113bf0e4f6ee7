//! Room transport port and in-process loopback implementation.
//!
//! The session does not speak any vendor protocol itself: joining a room
//! and exchanging out-of-band data messages go through [`RoomTransport`] /
//! [`RoomConnection`]. In production these would wrap a `livekit::Room` and
//! its data-channel API; [`LocalRoom`] stands in with a tokio broadcast bus
//! so the full session flow runs in-process.

use crate::error::SessionError;
use async_trait::async_trait;
use consult_types::DataMessage;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Capacity of the loopback room's data-message bus.
const DATA_BUS_CAPACITY: usize = 256;

/// Port for joining a realtime room.
#[async_trait]
pub trait RoomTransport: Send + Sync {
    /// Joins the room at `url` as `identity`, authorized by `token`.
    ///
    /// Resolves only once the data channel is usable, so callers may
    /// publish immediately without a readiness delay.
    async fn connect(
        &self,
        url: &str,
        token: &str,
        identity: &str,
    ) -> Result<Arc<dyn RoomConnection>, SessionError>;
}

/// An established room membership.
#[async_trait]
pub trait RoomConnection: Send + Sync {
    /// Identity this connection joined as.
    fn identity(&self) -> &str;

    /// Publishes an out-of-band message on `topic` to the other
    /// participants.
    async fn publish_data(&self, topic: &str, payload: &[u8]) -> Result<(), SessionError>;

    /// Subscribes to the room's data-message stream. Delivery may include
    /// the local participant's own messages; consumers filter by sender.
    fn subscribe(&self) -> broadcast::Receiver<DataMessage>;

    /// Leaves the room. Further publishes fail.
    async fn disconnect(&self);
}

/// In-process loopback room.
///
/// Every connection obtained from the same `LocalRoom` shares one broadcast
/// bus, so a test can join twice (client and simulated agent) and exchange
/// data messages exactly as two LiveKit participants would.
#[derive(Debug, Clone)]
pub struct LocalRoom {
    bus: broadcast::Sender<DataMessage>,
}

impl LocalRoom {
    pub fn new() -> Self {
        let (bus, _) = broadcast::channel(DATA_BUS_CAPACITY);
        Self { bus }
    }

    /// Observes all traffic on the room bus without joining.
    pub fn observe(&self) -> broadcast::Receiver<DataMessage> {
        self.bus.subscribe()
    }
}

impl Default for LocalRoom {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomTransport for LocalRoom {
    async fn connect(
        &self,
        url: &str,
        token: &str,
        identity: &str,
    ) -> Result<Arc<dyn RoomConnection>, SessionError> {
        info!(
            url,
            identity,
            token_len = token.len(),
            "joining loopback room"
        );

        Ok(Arc::new(LocalConnection {
            identity: identity.to_string(),
            bus: self.bus.clone(),
            connected: std::sync::atomic::AtomicBool::new(true),
        }))
    }
}

struct LocalConnection {
    identity: String,
    bus: broadcast::Sender<DataMessage>,
    connected: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl RoomConnection for LocalConnection {
    fn identity(&self) -> &str {
        &self.identity
    }

    async fn publish_data(&self, topic: &str, payload: &[u8]) -> Result<(), SessionError> {
        if !self.connected.load(std::sync::atomic::Ordering::Acquire) {
            return Err(SessionError::Transport(
                "not connected to a room".to_string(),
            ));
        }

        let message = DataMessage::new(topic, self.identity.clone(), payload.to_vec());
        // A send error only means no subscribers; the message is still
        // fire-and-forget.
        let _ = self.bus.send(message);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<DataMessage> {
        self.bus.subscribe()
    }

    async fn disconnect(&self) {
        if self
            .connected
            .swap(false, std::sync::atomic::Ordering::AcqRel)
        {
            info!(identity = %self.identity, "left loopback room");
        }
    }
}
