//! # SmokeLink
//!
//! `smokelink` is a remote control and telemetry client for a pellet smoker
//! controller. It talks to the controller over a small JSON-over-WebSocket
//! publish/subscribe convention: the client declares interest in topics,
//! publishes short text commands, and receives `{topic, payload}` pushes.
//!
//! ## Core Modules
//!
//! - `client`: The pub/sub core. Owns the connection lifecycle, the listener registry and inbound routing.
//! - `config`: Loads connection, polling and logging settings from file and environment.
//! - `grill`: Topic names, typed command publishers, cook plans and telemetry decoders.
//! - `registry`: Topic to ordered listener bookkeeping that survives reconnects.
//! - `transport`: Wire frames and the WebSocket session (reader and writer tasks).
//! - `utils`: Error types and logging setup.

pub mod client;
pub mod config;
pub mod grill;
pub mod registry;
pub mod transport;
pub mod utils;

pub use client::{ConnectionState, PubSubClient, SessionInfo, spawn_status_poll};
pub use registry::ListenerId;
pub use utils::{PubSubError, Result};
