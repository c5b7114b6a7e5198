//! The `error` module defines the error types used within `smokelink`.
//!
//! Only connection establishment surfaces as an error to callers. Inbound
//! frames that cannot be routed are described by [`MalformedFrame`], which the
//! session reader logs and drops.

use thiserror::Error;

/// Errors returned by [`crate::client::PubSubClient`] and the grill helpers.
#[derive(Debug, Error)]
pub enum PubSubError {
    /// The WebSocket handshake to the backend failed.
    #[error("failed to open session to {address}: {source}")]
    TransportEstablishment {
        address: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    /// A newer `connect` or a `disconnect` replaced this attempt before it finished.
    #[error("connection attempt to {address} was superseded")]
    Superseded { address: String },

    /// A structured payload could not be serialized before publishing.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PubSubError>;

/// Reasons an inbound frame is not a `{topic, payload}` delivery.
#[derive(Debug, Error)]
pub enum MalformedFrame {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no usable topic")]
    MissingTopic,

    #[error("frame has no payload")]
    MissingPayload,
}
