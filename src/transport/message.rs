//! Wire frames
//!
//! Outbound:
//! - `{"action":"subscribe","topic":"<topic>"}`
//! - `{"action":"unsubscribe","topic":"<topic>"}`
//! - `{"topic":"<topic>","payload":"<string>"}`
//!
//! Inbound deliveries are `{"topic":"<topic>","payload":<any>}`. Anything else
//! is reported as a [`MalformedFrame`] and dropped by the caller.

use serde::Serialize;
use serde_json::Value;

use crate::utils::MalformedFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Subscribe,
    Unsubscribe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutboundFrame {
    Intent { action: Action, topic: String },
    Publish { topic: String, payload: String },
}

impl OutboundFrame {
    pub fn subscribe(topic: &str) -> Self {
        Self::Intent {
            action: Action::Subscribe,
            topic: topic.to_string(),
        }
    }

    pub fn unsubscribe(topic: &str) -> Self {
        Self::Intent {
            action: Action::Unsubscribe,
            topic: topic.to_string(),
        }
    }

    pub fn publish(topic: &str, payload: &str) -> Self {
        Self::Publish {
            topic: topic.to_string(),
            payload: payload.to_string(),
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            Self::Intent { topic, .. } | Self::Publish { topic, .. } => topic,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A routed inbound delivery.
///
/// `payload` is always text: a JSON string arrives as its contents, any other
/// JSON value (number, object, array, bool, null) as its compact JSON
/// encoding. Listeners decode it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEnvelope {
    pub topic: String,
    pub payload: String,
}

impl InboundEnvelope {
    pub fn parse(text: &str) -> Result<Self, MalformedFrame> {
        let value: Value = serde_json::from_str(text).map_err(MalformedFrame::InvalidJson)?;
        let Value::Object(mut fields) = value else {
            return Err(MalformedFrame::NotAnObject);
        };

        let topic = match fields.remove("topic") {
            Some(Value::String(topic)) if !topic.is_empty() => topic,
            _ => return Err(MalformedFrame::MissingTopic),
        };

        let payload = match fields.remove("payload") {
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => return Err(MalformedFrame::MissingPayload),
        };

        Ok(Self { topic, payload })
    }
}
