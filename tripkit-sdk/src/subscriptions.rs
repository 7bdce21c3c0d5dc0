//! Event subscription ownership
//!
//! [`SubscriptionManager`] owns the three live channel subscriptions and the
//! tokio task that drains each of them into [`SharedState`]. Handles are
//! stored in a record with one named field per channel, so every channel can
//! be released independently — two subscriptions never share a slot.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use tripkit_bridge::{EventChannel, EventSource, SdkBridge, SdkEvent, SubscriptionId};
use tripkit_state::{SharedState, StateUpdate, TripType};

use crate::error::SubscriptionError;
use crate::startup::quota_update;

struct ChannelSubscription {
    id: SubscriptionId,
    task: JoinHandle<()>,
}

/// One named slot per channel; see the module docs for why this is not a map
#[derive(Default)]
struct ChannelHandles {
    status: Option<ChannelSubscription>,
    activity: Option<ChannelSubscription>,
    user_link: Option<ChannelSubscription>,
}

impl ChannelHandles {
    fn slot_mut(&mut self, channel: EventChannel) -> &mut Option<ChannelSubscription> {
        match channel {
            EventChannel::StatusUpdate => &mut self.status,
            EventChannel::UserActivity => &mut self.activity,
            EventChannel::UserLink => &mut self.user_link,
        }
    }

    fn first_attached(&self) -> Option<EventChannel> {
        EventChannel::ALL
            .into_iter()
            .find(|channel| match channel {
                EventChannel::StatusUpdate => self.status.is_some(),
                EventChannel::UserActivity => self.activity.is_some(),
                EventChannel::UserLink => self.user_link.is_some(),
            })
    }

    fn take_all(&mut self) -> Vec<(EventChannel, ChannelSubscription)> {
        let mut taken = Vec::new();
        for channel in EventChannel::ALL {
            if let Some(subscription) = self.slot_mut(channel).take() {
                taken.push((channel, subscription));
            }
        }
        taken
    }
}

/// Owns the live event subscriptions and their forwarding tasks
///
/// Guarantees each channel is attached at most once; a second `attach_all`
/// without an intervening `release_all` fails instead of silently dropping
/// the first handles.
pub struct SubscriptionManager<B> {
    bridge: Arc<B>,
    state: SharedState,
    handles: Mutex<ChannelHandles>,
}

impl<B: SdkBridge + EventSource + 'static> SubscriptionManager<B> {
    pub fn new(bridge: Arc<B>, state: SharedState) -> Self {
        Self {
            bridge,
            state,
            handles: Mutex::new(ChannelHandles::default()),
        }
    }

    /// Subscribe to all three channels and start forwarding their events
    ///
    /// Returns the handle ids in [`EventChannel::ALL`] order. If a subscribe
    /// fails partway, already-attached channels keep their handles so that
    /// `release_all` can still clean up.
    pub async fn attach_all(&self) -> Result<Vec<SubscriptionId>, SubscriptionError> {
        let mut handles = self.handles.lock().await;
        if let Some(channel) = handles.first_attached() {
            return Err(SubscriptionError::AlreadyAttached(channel));
        }

        let mut ids = Vec::with_capacity(EventChannel::ALL.len());
        for channel in EventChannel::ALL {
            let subscription = self.bridge.subscribe(channel).await?;
            let id = subscription.id;
            let task = tokio::spawn(forward_channel(
                Arc::clone(&self.bridge),
                self.state.clone(),
                channel,
                subscription.events,
            ));
            *handles.slot_mut(channel) = Some(ChannelSubscription { id, task });
            ids.push(id);
            tracing::debug!(%id, %channel, "attached event channel");
        }

        Ok(ids)
    }

    /// Release every attached channel, each one independently
    ///
    /// Forwarding tasks are aborted; in-flight fetches inside them resolve
    /// or are dropped with the task, leaking nothing. A failed unsubscribe
    /// on one channel does not skip the others.
    pub async fn release_all(&self) {
        let taken = self.handles.lock().await.take_all();
        for (channel, subscription) in taken {
            subscription.task.abort();
            if let Err(error) = self.bridge.unsubscribe(subscription.id).await {
                tracing::warn!(%channel, id = %subscription.id, %error, "failed to release subscription");
            } else {
                tracing::debug!(%channel, id = %subscription.id, "released event channel");
            }
        }
    }

    /// Whether any channel currently holds a live handle
    pub async fn is_attached(&self) -> bool {
        self.handles.lock().await.first_attached().is_some()
    }

    /// The ids currently held, in [`EventChannel::ALL`] order
    pub async fn attached_ids(&self) -> Vec<SubscriptionId> {
        let handles = self.handles.lock().await;
        let mut ids = Vec::new();
        for channel in EventChannel::ALL {
            let slot = match channel {
                EventChannel::StatusUpdate => &handles.status,
                EventChannel::UserActivity => &handles.activity,
                EventChannel::UserLink => &handles.user_link,
            };
            if let Some(subscription) = slot {
                ids.push(subscription.id);
            }
        }
        ids
    }
}

impl<B> Drop for SubscriptionManager<B> {
    fn drop(&mut self) {
        // Release the bridge-side handles via release_all; here we can only
        // stop the forwarding tasks.
        if let Ok(mut handles) = self.handles.try_lock() {
            for (_, subscription) in handles.take_all() {
                subscription.task.abort();
            }
        }
    }
}

/// Drain one channel's events into the shared state
async fn forward_channel<B: SdkBridge + 'static>(
    bridge: Arc<B>,
    state: SharedState,
    channel: EventChannel,
    mut events: mpsc::Receiver<SdkEvent>,
) {
    while let Some(event) = events.recv().await {
        match event {
            SdkEvent::StatusUpdate(snapshot) => {
                // The push carries status labels only; usage figures are
                // pulled fresh. Overlapping updates resolve last-write-wins.
                match bridge.quota_data().await {
                    Ok(usage) => state.apply(quota_update(&snapshot, &usage)),
                    Err(error) => {
                        tracing::warn!(%channel, %error, "quota refresh failed; keeping previous views");
                    }
                }
            }
            SdkEvent::UserActivity { activity_type } => {
                state.apply(StateUpdate::TripType(TripType::classify(activity_type)));
            }
            SdkEvent::UserLink { install_id } => {
                state.apply(StateUpdate::InstallId(install_id));
                // Exactly one acknowledgment per event
                if let Err(error) = bridge.send_user_link_callback().await {
                    tracing::warn!(%channel, %error, "link acknowledgment failed");
                }
            }
        }
    }
    tracing::debug!(%channel, "event channel closed");
}
