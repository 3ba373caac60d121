use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::types::Snapshot;

/// Opaque id used to cancel a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionHandle(pub u64);

/// Receiving end of a collection watch.
///
/// Dropping it is enough to stop delivery; the store prunes the sender on
/// its next write to the collection.
pub struct Subscription {
    handle: SubscriptionHandle,
    rx: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    pub(crate) fn new(handle: SubscriptionHandle, rx: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { handle, rx }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        self.handle
    }

    /// Wait for the next snapshot. `None` once the subscription is cancelled.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Take a queued snapshot without waiting.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    pub fn into_parts(self) -> (SubscriptionHandle, mpsc::UnboundedReceiver<Snapshot>) {
        (self.handle, self.rx)
    }
}
