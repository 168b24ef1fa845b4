//! Change feed broadcast to interested observers.
//!
//! Store mutations publish a [`StoreEvent`] after they commit. Delivery is
//! lossy: slow subscribers miss events rather than backpressure the write
//! path, and publishing with no subscribers is a no-op.

use tokio::sync::broadcast;

const FEED_CAPACITY: usize = 64;

/// A committed change to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A plan was created, updated, transitioned, or deleted.
    PlanChanged { id: u64 },
    /// A plan's report was created or changed review status.
    ReportChanged { plan_id: u64 },
    /// A notification was delivered to a user's inbox.
    NotificationAdded { target: String },
}

/// Broadcast channel handle for store events.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    /// Opens a new subscription. Events published before this call are not
    /// replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event to all current subscribers. A send error only means
    /// nobody is listening, so it is ignored.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
