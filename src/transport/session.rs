//! WebSocket session
//!
//! One `Session` is one established connection to the backend, from open to
//! close. Responsibilities:
//! - open the socket (`open`)
//! - forward queued frames to the socket from a writer task, in FIFO order
//! - read frames on a reader task and hand text to the router callback
//! - report the end of the session exactly once through `on_closed`
//!
//! The session knows nothing about topics; the client decides what to send
//! and what to do with inbound text.

use chrono::{DateTime, Utc};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, trace, warn};
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::transport::message::OutboundFrame;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Performs the WebSocket handshake with `address`.
pub async fn open(address: &str) -> Result<WsStream, tungstenite::Error> {
    let (stream, response) = connect_async(address).await?;
    trace!(status = %response.status(), "handshake complete");
    Ok(stream)
}

pub struct Session {
    pub id: String,
    pub address: String,
    pub opened_at: DateTime<Utc>,
    outbound: mpsc::UnboundedSender<WsMessage>,
    writer: Option<JoinHandle<()>>,
    reader: JoinHandle<()>,
}

impl Session {
    /// Splits `stream` and spawns the writer and reader tasks.
    ///
    /// `on_text` runs on the reader task for every text frame, in arrival
    /// order. `on_closed` runs once when the backend closes the socket or the
    /// transport fails; it does not run after [`Session::close`].
    pub fn start<F, C>(address: &str, stream: WsStream, on_text: F, on_closed: C) -> Self
    where
        F: Fn(&str) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let id = format!("session-{}", Uuid::new_v4());
        let (ws_sender, ws_receiver) = stream.split();
        let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();

        let writer = tokio::spawn(write_loop(id.clone(), ws_sender, rx));
        let reader = tokio::spawn(read_loop(id.clone(), ws_receiver, on_text, on_closed));

        Self {
            id,
            address: address.to_string(),
            opened_at: Utc::now(),
            outbound: tx,
            writer: Some(writer),
            reader,
        }
    }

    /// Queues `frame` for the writer task. Returns false if it could not be
    /// queued (encoding failed or the writer already stopped).
    pub fn send(&self, frame: &OutboundFrame) -> bool {
        let text = match frame.encode() {
            Ok(json) => json,
            Err(e) => {
                error!(topic = frame.topic(), "Failed to serialize frame: {e}");
                return false;
            }
        };

        match self.outbound.send(WsMessage::text(text)) {
            Ok(()) => true,
            Err(_) => {
                warn!(session = %self.id, topic = frame.topic(), "writer closed, frame dropped");
                false
            }
        }
    }

    /// Sends a Close frame and stops routing inbound frames.
    ///
    /// Returns the writer task, which finishes once every frame queued before
    /// the Close has been written. Dropping the handle leaves it detached.
    pub fn close(mut self) -> Option<JoinHandle<()>> {
        let _ = self.outbound.send(WsMessage::Close(None));
        debug!(session = %self.id, "closing session");
        // Drop aborts the reader and releases the writer's channel
        self.writer.take()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

async fn write_loop(
    id: String,
    mut ws_sender: SplitSink<WsStream, WsMessage>,
    mut rx: mpsc::UnboundedReceiver<WsMessage>,
) {
    while let Some(msg) = rx.recv().await {
        let closing = msg.is_close();
        if let Err(e) = ws_sender.send(msg).await {
            warn!(session = %id, "Failed to send frame: {e}");
            break;
        }
        if closing {
            break;
        }
    }

    let _ = ws_sender.close().await;
    debug!(session = %id, "send loop closed");
}

async fn read_loop<F, C>(id: String, mut ws_receiver: SplitStream<WsStream>, on_text: F, on_closed: C)
where
    F: Fn(&str),
    C: FnOnce(),
{
    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => on_text(text.as_str()),
            Ok(WsMessage::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => on_text(text),
                Err(_) => debug!(session = %id, len = bytes.len(), "dropping non-UTF-8 binary frame"),
            },
            Ok(WsMessage::Close(reason)) => {
                debug!(session = %id, ?reason, "backend closed the session");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(session = %id, "transport error: {e}");
                break;
            }
        }
    }

    on_closed();
}
