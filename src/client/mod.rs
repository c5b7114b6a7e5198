//! The `client` module is the pub/sub core used by the UI layers.
//!
//! [`PubSubClient`] owns the subscription registry and at most one transport
//! session. It provides connect/disconnect, subscribe/unsubscribe and
//! publish, routes inbound frames to listeners, and replays every known
//! subscription whenever a new session opens.

pub mod poller;
pub mod pubsub_client;
mod router;

pub use poller::spawn_status_poll;
pub use pubsub_client::{ConnectionState, PubSubClient, SessionInfo};
