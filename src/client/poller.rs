use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, trace};

use crate::client::PubSubClient;
use crate::grill::topics;

/// Re-issues the status request every `every` while the client is connected.
///
/// This is a backstop against missed push updates, not a reconnect loop: a
/// closed client is left alone. The first request is skipped because
/// `connect` already sends one. Returns `None` for a zero interval.
pub fn spawn_status_poll(client: PubSubClient, every: Duration) -> Option<JoinHandle<()>> {
    if every.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if client.is_connected() {
                trace!("polling controller status");
                client.publish(topics::COMMAND, topics::GET_STATUS);
            } else {
                debug!("not connected, skipping status poll");
            }
        }
    }))
}
