//! Subscription handle types
//!
//! Every live event channel is represented by exactly one [`Subscription`].
//! The handle must be retained until teardown; its id is what the bridge
//! needs to release the channel again.

use tokio::sync::mpsc;

use crate::event::SdkEvent;

/// Unique identifier for one channel subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Create a new SubscriptionId with the given value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A live subscription to one event channel
///
/// Dropping the receiver stops delivery but does not release the channel on
/// the bridge side; call `EventSource::unsubscribe` with `id` for that.
#[derive(Debug)]
pub struct Subscription {
    /// Token for releasing this subscription
    pub id: SubscriptionId,
    /// Decoded events pushed by the bridge
    pub events: mpsc::Receiver<SdkEvent>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, events: mpsc::Receiver<SdkEvent>) -> Self {
        Self { id, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_display() {
        assert_eq!(SubscriptionId::new(7).to_string(), "sub-7");
        assert_eq!(SubscriptionId::new(7).as_u64(), 7);
    }
}
