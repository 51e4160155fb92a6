//! Thin mutation event bus.
//!
//! Stores publish an event after every committed mutation so interested
//! parties can re-fetch aggregates they own. The bus makes nothing atomic
//! across stores; it only carries re-fetch hints.

use tokio::sync::broadcast;

use aries_types::EntityFamily;

/// Kind of committed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
    Joined,
    Left,
}

/// A committed mutation against one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub family: EntityFamily,
    pub id: u64,
    pub kind: Mutation,
}

/// Shared broadcast bus for [`StoreEvent`]s. Cheap to clone.
#[derive(Clone)]
pub struct StoreEvents {
    tx: broadcast::Sender<StoreEvent>,
}

impl StoreEvents {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Subscribe to future mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish a committed mutation. Dropped silently when nobody listens.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for StoreEvents {
    fn default() -> Self {
        Self::new()
    }
}
