//! Pub/sub client
//!
//! `PubSubClient` is the single owner of the subscription registry and the
//! transport session. It is cheap to clone; every clone talks to the same
//! state, so the composition root can hand copies to whichever component
//! needs to subscribe or publish.
//!
//! Concurrency notes:
//! - All state lives behind one `std::sync::Mutex`. It is never held across
//!   an `.await` and never held while listeners run, so listeners may call
//!   back into the client (subscribe, publish, ...).
//! - Outbound frames are queued on the session's channel while the lock is
//!   held, which is what orders resubscription frames before the status
//!   request on a fresh session.
//! - Each `connect` bumps a generation counter. Callbacks from a session
//!   check it so a stale reader cannot mark a newer session closed.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::router;
use crate::config::Settings;
use crate::grill::topics;
use crate::registry::{ListenerId, Removal, SubscriptionRegistry};
use crate::transport::session::{self, Session};
use crate::transport::OutboundFrame;
use crate::utils::{PubSubError, Result};

/// Lifecycle of the transport session. There is no reconnecting state: a
/// dropped session becomes `Closed` until the caller connects again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Closed,
    Connecting,
    Open,
}

/// Snapshot of the open session, for connection-status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub address: String,
    pub opened_at: DateTime<Utc>,
}

#[derive(Default)]
struct ClientState {
    registry: SubscriptionRegistry,
    state: ConnectionState,
    session: Option<Session>,
    generation: u64,
    /// Dropping this sender cancels the `connect` that is waiting on the handshake.
    pending: Option<oneshot::Sender<()>>,
}

impl ClientState {
    fn open_session(&self) -> Option<&Session> {
        match self.state {
            ConnectionState::Open => self.session.as_ref(),
            _ => None,
        }
    }

    /// Closes the current session and cancels any pending handshake.
    ///
    /// Returns the closed session's writer task, if there was a session.
    fn reset(&mut self) -> Option<JoinHandle<()>> {
        self.generation += 1;
        self.pending = None;
        self.state = ConnectionState::Closed;
        self.session.take().and_then(Session::close)
    }
}

/// Puts the client back to `Closed` when a `connect` future is dropped
/// while it waits on the handshake.
struct HandshakeGuard<'a> {
    shared: &'a Shared,
    generation: u64,
    armed: bool,
}

impl HandshakeGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for HandshakeGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.shared.lock();
        if state.generation == self.generation && state.state == ConnectionState::Connecting {
            state.pending = None;
            state.state = ConnectionState::Closed;
            debug!("connect abandoned during handshake");
        }
    }
}

struct Shared {
    default_address: String,
    state: Mutex<ClientState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ClientState> {
        // listeners never run under the lock, so a poisoned guard still holds consistent state
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone)]
pub struct PubSubClient {
    shared: Arc<Shared>,
}

impl PubSubClient {
    /// Creates a client that connects to `default_address` when
    /// [`connect`](Self::connect) is called without an explicit address.
    pub fn new(default_address: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                default_address: default_address.into(),
                state: Mutex::new(ClientState::default()),
            }),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.connection.address.clone())
    }

    pub fn default_address(&self) -> &str {
        &self.shared.default_address
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.shared.lock()
    }

    /// Opens a session to `address` (or the default address).
    ///
    /// Any existing session is closed first, and a `connect` still waiting on
    /// its handshake is superseded. Once the handshake completes, a subscribe
    /// intent is sent for every registered topic, followed by one status
    /// request on `grill/command`. No retry is attempted on failure.
    pub async fn connect(&self, address: Option<&str>) -> Result<()> {
        let address = address.unwrap_or(&self.shared.default_address).to_string();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        let generation = {
            let mut state = self.lock();
            if state.reset().is_some() {
                debug!("closed previous session before reconnecting");
            }
            state.state = ConnectionState::Connecting;
            state.pending = Some(cancel_tx);
            state.generation
        };

        info!(%address, "connecting");

        let mut guard = HandshakeGuard {
            shared: &self.shared,
            generation,
            armed: true,
        };

        let opened = tokio::select! {
            opened = session::open(&address) => opened,
            _ = cancel_rx => {
                debug!(%address, "connect superseded while handshaking");
                return Err(PubSubError::Superseded { address });
            }
        };

        let mut state = self.lock();
        guard.disarm();
        if state.generation != generation {
            debug!(%address, "connect superseded after handshake");
            return Err(PubSubError::Superseded { address });
        }
        state.pending = None;

        let stream = match opened {
            Ok(stream) => stream,
            Err(source) => {
                state.state = ConnectionState::Closed;
                warn!(%address, "connection failed: {source}");
                return Err(PubSubError::TransportEstablishment {
                    address,
                    source: Box::new(source),
                });
            }
        };

        let on_text = {
            let shared = Arc::downgrade(&self.shared);
            move |text: &str| {
                if let Some(shared) = shared.upgrade() {
                    router::route(text, |topic| shared.lock().registry.listeners_for(topic));
                }
            }
        };
        let on_closed = {
            let shared = Arc::downgrade(&self.shared);
            move || session_ended(&shared, generation)
        };

        let session = Session::start(&address, stream, on_text, on_closed);

        let resubscribed = state.registry.topics();
        for topic in &resubscribed {
            session.send(&OutboundFrame::subscribe(topic));
            debug!(session = %session.id, topic, "resubscribed");
        }
        session.send(&OutboundFrame::publish(topics::COMMAND, topics::GET_STATUS));

        info!(
            session = %session.id,
            %address,
            topics = resubscribed.len(),
            "session open"
        );
        state.session = Some(session);
        state.state = ConnectionState::Open;
        Ok(())
    }

    /// Closes the active session, if any. Safe to call repeatedly.
    pub fn disconnect(&self) {
        if self.lock().reset().is_some() {
            info!("disconnected");
        }
    }

    /// Like [`disconnect`](Self::disconnect), but waits until every frame
    /// queued on the session, and the Close frame after them, has been written.
    pub async fn shutdown(&self) {
        let writer = self.lock().reset();
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                warn!("writer task ended abnormally: {e}");
            }
            info!("disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.lock().state == ConnectionState::Open
    }

    pub fn state(&self) -> ConnectionState {
        self.lock().state
    }

    pub fn session_info(&self) -> Option<SessionInfo> {
        self.lock().open_session().map(|session| SessionInfo {
            id: session.id.clone(),
            address: session.address.clone(),
            opened_at: session.opened_at,
        })
    }

    /// Registers `listener` for `topic` and returns a handle for
    /// [`unsubscribe`](Self::unsubscribe).
    ///
    /// The first listener on a topic sends a subscribe intent right away if a
    /// session is open; otherwise the intent goes out on the next `connect`.
    pub fn subscribe<F>(&self, topic: &str, listener: F) -> ListenerId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let registration = state.registry.add(topic, Arc::new(listener));

        if registration.first_for_topic {
            match state.open_session() {
                Some(session) => {
                    session.send(&OutboundFrame::subscribe(topic));
                    debug!(topic, "subscribed");
                }
                None => debug!(topic, "subscription deferred until connected"),
            }
        }

        registration.id
    }

    /// Like [`subscribe`](Self::subscribe), but decodes each payload as JSON
    /// `T` first. Payloads that do not decode are logged and skipped.
    pub fn subscribe_json<T, F>(&self, topic: &str, listener: F) -> ListenerId
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let name = topic.to_string();
        self.subscribe(topic, move |payload| {
            match serde_json::from_str::<T>(payload) {
                Ok(value) => listener(value),
                Err(e) => warn!(topic = %name, "payload did not decode: {e}"),
            }
        })
    }

    /// Removes one listener (`Some(id)`) or every listener (`None`) from `topic`.
    ///
    /// When the topic loses its last listener an unsubscribe intent is sent
    /// if a session is open. Unknown topics are ignored.
    pub fn unsubscribe(&self, topic: &str, listener: Option<ListenerId>) {
        let mut state = self.lock();
        match state.registry.remove(topic, listener) {
            Removal::TopicCleared => {
                if let Some(session) = state.open_session() {
                    session.send(&OutboundFrame::unsubscribe(topic));
                }
                debug!(topic, "unsubscribed");
            }
            Removal::Removed => debug!(topic, "listener removed"),
            Removal::Unknown => {}
        }
    }

    /// Sends `payload` on `topic` if a session is open; otherwise does
    /// nothing. Nothing is queued for later delivery.
    pub fn publish(&self, topic: &str, payload: &str) {
        let state = self.lock();
        match state.open_session() {
            Some(session) => {
                session.send(&OutboundFrame::publish(topic, payload));
                debug!(topic, payload, "published");
            }
            None => debug!(topic, "not connected, publish dropped"),
        }
    }

    /// Topics that currently have at least one listener.
    pub fn subscribed_topics(&self) -> Vec<String> {
        self.lock().registry.topics()
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.lock().registry.listener_count(topic)
    }
}

impl fmt::Debug for PubSubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("PubSubClient")
            .field("default_address", &self.shared.default_address)
            .field("state", &state.state)
            .field("registry", &state.registry)
            .finish()
    }
}

/// Called from the reader task when the backend or the transport ends the session.
fn session_ended(shared: &Weak<Shared>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };

    let ended = {
        let mut state = shared.lock();
        if state.generation != generation {
            return;
        }
        state.state = ConnectionState::Closed;
        state.session.take()
    };

    if let Some(session) = ended {
        info!(session = %session.id, "session closed by backend");
    }
}
