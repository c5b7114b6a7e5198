use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, trace, warn};

use crate::registry::Listener;
use crate::transport::InboundEnvelope;

/// Routes one inbound text frame to the listeners registered for its topic.
///
/// `listeners_for` snapshots the listeners so no lock is held while they run.
/// Frames without the `{topic, payload}` shape are dropped. A listener that
/// panics is logged and skipped; the rest still run and the reader keeps
/// going. Returns how many listeners were invoked.
pub(crate) fn route<L>(text: &str, listeners_for: L) -> usize
where
    L: FnOnce(&str) -> Vec<Listener>,
{
    let envelope = match InboundEnvelope::parse(text) {
        Ok(envelope) => envelope,
        Err(reason) => {
            debug!(%reason, "dropping inbound frame");
            return 0;
        }
    };

    let listeners = listeners_for(&envelope.topic);
    trace!(topic = %envelope.topic, listeners = listeners.len(), "routing frame");
    for listener in &listeners {
        if catch_unwind(AssertUnwindSafe(|| listener(&envelope.payload))).is_err() {
            warn!(topic = %envelope.topic, "listener panicked, frame skipped for it");
        }
    }
    listeners.len()
}
