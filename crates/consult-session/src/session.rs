//! Call session state machine.

use crate::credentials::{random_identity, CredentialIssuer};
use crate::error::SessionError;
use crate::transcript::TranscriptBuffer;
use crate::transport::{RoomConnection, RoomTransport};
use consult_types::{CallState, Lang, TOPIC_LANG, TOPIC_TRANSCRIPT};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the per-session event broadcast channel.
const SESSION_EVENT_CAPACITY: usize = 256;

/// Events a UI shell can observe from a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The call lifecycle state changed.
    StateChanged(CallState),
    /// A transcript fragment arrived from the remote agent.
    TranscriptAppended(String),
}

#[derive(Default)]
struct SessionInner {
    state: CallState,
    lang: Lang,
    credential: Option<String>,
    last_error: Option<String>,
    identity: Option<String>,
    connection: Option<Arc<dyn RoomConnection>>,
    sink_task: Option<JoinHandle<()>>,
    transcript: TranscriptBuffer,
}

/// Controller for one browser-tab-scoped call against the remote agent.
///
/// `start()` runs a single best-effort attempt: one credential fetch with a
/// fresh random identity, one room join. On any failure the session returns
/// to `Idle` with a human-readable `last_error`; the user recovers by
/// starting again. While `Connecting` or `InCall`, further `start()` calls
/// are ignored, so at most one attempt is ever in flight.
///
/// On reaching `InCall` the session announces the currently selected
/// language on the `lang` topic and re-announces it on every later change,
/// and spawns a sink task that appends remote `transcript` fragments to a
/// bounded display buffer.
#[derive(Clone)]
pub struct CallSession {
    room: String,
    server_url: String,
    issuer: Arc<dyn CredentialIssuer>,
    transport: Arc<dyn RoomTransport>,
    inner: Arc<Mutex<SessionInner>>,
    events: broadcast::Sender<SessionEvent>,
}

impl CallSession {
    pub fn new(
        room: impl Into<String>,
        server_url: impl Into<String>,
        issuer: Arc<dyn CredentialIssuer>,
        transport: Arc<dyn RoomTransport>,
    ) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            room: room.into(),
            server_url: server_url.into(),
            issuer,
            transport,
            inner: Arc::new(Mutex::new(SessionInner::default())),
            events,
        }
    }

    /// Starts a call attempt.
    ///
    /// No-op when an attempt is already connecting or a call is live.
    /// Never returns an error: failures land in [`CallSession::last_error`]
    /// with the session back at `Idle`.
    pub async fn start(&self) {
        let identity = random_identity();

        {
            let mut inner = self.inner.lock().await;
            if inner.state.is_active() {
                debug!(state = ?inner.state, "start ignored: attempt already active");
                return;
            }
            inner.state = CallState::Connecting;
            inner.last_error = None;
            inner.credential = None;
            inner.identity = Some(identity.clone());
        }
        self.emit(SessionEvent::StateChanged(CallState::Connecting));

        match self.connect(&identity).await {
            Ok((credential, connection)) => {
                let receiver = connection.subscribe();
                let lang = {
                    let mut inner = self.inner.lock().await;
                    inner.state = CallState::InCall;
                    inner.credential = Some(credential);
                    inner.connection = Some(connection.clone());
                    inner.transcript.clear();
                    inner.sink_task = Some(self.spawn_transcript_sink(receiver, identity.clone()));
                    inner.lang
                };

                info!(room = %self.room, identity, "call connected");
                self.emit(SessionEvent::StateChanged(CallState::InCall));
                self.announce_language(&connection, lang).await;
            }
            Err(e) => {
                warn!(room = %self.room, "call attempt failed: {e}");
                {
                    let mut inner = self.inner.lock().await;
                    inner.state = CallState::Idle;
                    inner.last_error = Some(e.to_string());
                    inner.credential = None;
                    inner.identity = None;
                }
                self.emit(SessionEvent::StateChanged(CallState::Idle));
            }
        }
    }

    async fn connect(
        &self,
        identity: &str,
    ) -> Result<(String, Arc<dyn RoomConnection>), SessionError> {
        let credential = self.issuer.issue(&self.room, identity).await?;
        let connection = self
            .transport
            .connect(&self.server_url, &credential, identity)
            .await?;
        Ok((credential, connection))
    }

    /// Selects the spoken language.
    ///
    /// The selection is announced to the room when the call connects and
    /// re-announced immediately on every change while in-call.
    pub async fn set_language(&self, lang: Lang) {
        let connection = {
            let mut inner = self.inner.lock().await;
            inner.lang = lang;
            if inner.state == CallState::InCall {
                inner.connection.clone()
            } else {
                None
            }
        };

        if let Some(connection) = connection {
            self.announce_language(&connection, lang).await;
        }
    }

    /// Publishes the language announcement, fire-and-forget.
    async fn announce_language(&self, connection: &Arc<dyn RoomConnection>, lang: Lang) {
        if let Err(e) = connection
            .publish_data(TOPIC_LANG, lang.as_code().as_bytes())
            .await
        {
            debug!(%lang, "language announcement dropped: {e}");
        }
    }

    /// Ends a live call and returns to `Idle`.
    ///
    /// No-op unless in-call: a connecting attempt is not cancellable.
    pub async fn hang_up(&self) {
        let (connection, sink_task) = {
            let mut inner = self.inner.lock().await;
            if inner.state != CallState::InCall {
                return;
            }
            inner.state = CallState::Idle;
            inner.credential = None;
            inner.identity = None;
            (inner.connection.take(), inner.sink_task.take())
        };

        if let Some(task) = sink_task {
            task.abort();
        }
        if let Some(connection) = connection {
            connection.disconnect().await;
        }

        info!(room = %self.room, "call ended");
        self.emit(SessionEvent::StateChanged(CallState::Idle));
    }

    fn spawn_transcript_sink(
        &self,
        mut receiver: broadcast::Receiver<consult_types::DataMessage>,
        local_identity: String,
    ) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(message) => {
                        if message.topic != TOPIC_TRANSCRIPT || message.sender == local_identity {
                            continue;
                        }
                        let Some(text) = message.text() else {
                            debug!(sender = %message.sender, "dropping non-UTF-8 transcript payload");
                            continue;
                        };
                        let text = text.to_string();
                        inner.lock().await.transcript.push(text.clone());
                        let _ = events.send(SessionEvent::TranscriptAppended(text));
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "transcript stream lagged, fragments dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    pub async fn state(&self) -> CallState {
        self.inner.lock().await.state
    }

    /// Message from the most recent failed attempt, cleared on the next
    /// start.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.lock().await.last_error.clone()
    }

    /// The join credential of the live call, if any.
    pub async fn credential(&self) -> Option<String> {
        self.inner.lock().await.credential.clone()
    }

    pub async fn language(&self) -> Lang {
        self.inner.lock().await.lang
    }

    /// Snapshot of the transcript buffer in arrival order.
    pub async fn transcript(&self) -> Vec<String> {
        self.inner.lock().await.transcript.snapshot()
    }

    /// Subscribes to session events for UI updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // Send errors only mean no UI is listening.
        let _ = self.events.send(event);
    }
}
