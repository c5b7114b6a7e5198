use std::collections::HashMap;

use crate::registry::topic::{Listener, ListenerId, Topic};

/// Outcome of [`SubscriptionRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: ListenerId,
    /// True when this listener created the topic entry, meaning the backend
    /// has not been told about the topic yet.
    pub first_for_topic: bool,
}

/// Outcome of [`SubscriptionRegistry::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Topic not registered, or the given listener was not part of it.
    Unknown,
    /// A listener was removed and others remain on the topic.
    Removed,
    /// The topic lost its last listener and its entry was deleted.
    TopicCleared,
}

/// Topic → ordered listeners.
///
/// A topic is present as a key if and only if it has at least one listener.
/// The registry outlives any number of transport sessions, which is what
/// makes resubscription after a reconnect possible.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    topics: HashMap<String, Topic>,
    next_id: u64,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` to `topic`, creating the entry if needed.
    pub fn add(&mut self, topic: &str, listener: Listener) -> Registration {
        self.next_id += 1;
        let id = ListenerId(self.next_id);

        let first_for_topic = !self.topics.contains_key(topic);
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .add(id, listener);

        Registration {
            id,
            first_for_topic,
        }
    }

    /// Removes one listener (`Some(id)`) or all of them (`None`) from `topic`.
    pub fn remove(&mut self, topic: &str, id: Option<ListenerId>) -> Removal {
        let Some(entry) = self.topics.get_mut(topic) else {
            return Removal::Unknown;
        };

        match id {
            Some(id) => {
                if !entry.remove(id) {
                    return Removal::Unknown;
                }
            }
            None => {
                self.topics.remove(topic);
                return Removal::TopicCleared;
            }
        }

        if entry.is_empty() {
            self.topics.remove(topic);
            Removal::TopicCleared
        } else {
            Removal::Removed
        }
    }

    /// Listeners for `topic` in registration order; empty if unknown.
    pub fn listeners_for(&self, topic: &str) -> Vec<Listener> {
        self.topics
            .get(topic)
            .map(Topic::snapshot)
            .unwrap_or_default()
    }

    /// Every topic that currently has a listener, sorted for stable output.
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.topics.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Topic::len)
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
