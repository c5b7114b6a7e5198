//! The `registry` module tracks which listeners are interested in which topics.
//!
//! It is pure bookkeeping: it never touches the network. The client consults
//! it to decide when subscribe/unsubscribe intent frames must be sent, to
//! replay every known topic after a new session opens, and to look up the
//! listeners an inbound frame should be routed to.

pub mod registry;
pub mod topic;

pub use registry::{Registration, Removal, SubscriptionRegistry};
pub use topic::{Listener, ListenerId, Topic};
