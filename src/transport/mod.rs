//! The `transport` module is responsible for the WebSocket session with the
//! grill's automation controller.
//!
//! It defines the JSON frames exchanged with the backend and owns the socket
//! itself: opening it, splitting it into a writer task fed by a channel and a
//! reader task that hands every text frame to the client's router.

pub mod message;
pub mod session;

pub use message::{InboundEnvelope, OutboundFrame};
pub use session::{Session, WsStream};

#[cfg(test)]
mod tests;
