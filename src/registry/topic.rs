use std::fmt;
use std::sync::Arc;

/// Callback invoked with the payload of every frame delivered on a topic.
pub type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Handle identifying one registration, used to unsubscribe a single listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// A topic and its listeners, kept in registration order.
pub struct Topic {
    pub name: String,
    listeners: Vec<(ListenerId, Listener)>,
}

impl Topic {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            listeners: Vec::new(),
        }
    }

    /// Appends a listener; earlier registrations are invoked first.
    pub fn add(&mut self, id: ListenerId, listener: Listener) {
        self.listeners.push((id, listener));
    }

    /// Removes the listener registered under `id`. Returns whether one was found.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(lid, _)| *lid == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Cheap copy of the listener list so callers can invoke it without
    /// holding whatever lock guards the registry.
    pub fn snapshot(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<ListenerId> = self.listeners.iter().map(|(id, _)| *id).collect();
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("listeners", &ids)
            .finish()
    }
}
