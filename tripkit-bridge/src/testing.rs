//! Scripted in-memory bridge for tests and demos
//!
//! [`ScriptedBridge`] implements both [`SdkBridge`] and [`EventSource`]
//! against canned data: a queue of lifecycle states, fixed identity values,
//! per-stage failure injection and per-channel event injection. Call
//! counters make the exactly-once properties (init, link acknowledgment,
//! unsubscribe) assertable.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::bridge::{EventSource, SdkBridge};
use crate::error::{BridgeError, Result};
use crate::event::{EventChannel, SdkEvent};
use crate::subscription::{Subscription, SubscriptionId};
use crate::types::{LifecycleState, QuotaUsage, StatusSnapshot};

const EVENT_BUFFER: usize = 16;

/// A fully scripted bridge implementation
///
/// Lifecycle states are consumed front-to-back by `check_init_status`; the
/// last state repeats forever, so `[InitInProgress, Initialized]` models an
/// initialization that completes after one re-check.
pub struct ScriptedBridge {
    lifecycle: Mutex<VecDeque<LifecycleState>>,
    accepts_init: bool,
    user_id: String,
    sdk_version: String,
    user_access_token: String,
    status: Mutex<StatusSnapshot>,
    quota: Mutex<QuotaUsage>,
    failing: Mutex<HashSet<&'static str>>,
    init_calls: AtomicUsize,
    link_ack_calls: AtomicUsize,
    next_id: AtomicU64,
    senders: Mutex<HashMap<EventChannel, mpsc::Sender<SdkEvent>>>,
    unsubscribed: Mutex<Vec<SubscriptionId>>,
}

impl ScriptedBridge {
    /// Create a bridge that will report the given lifecycle states in order
    pub fn new(lifecycle: impl IntoIterator<Item = LifecycleState>) -> Self {
        Self {
            lifecycle: Mutex::new(lifecycle.into_iter().collect()),
            accepts_init: true,
            user_id: "user-0001".to_string(),
            sdk_version: "6.0.0".to_string(),
            user_access_token: "token-0001".to_string(),
            status: Mutex::new(StatusSnapshot {
                wifi_quota_status: "OK".to_string(),
                mobile_quota_status: "OK".to_string(),
                disk_quota_status: "OK".to_string(),
            }),
            quota: Mutex::new(QuotaUsage {
                wifi_quota_used: 120,
                wifi_quota_total: 500,
                mobile_quota_used: 30,
                mobile_quota_total: 100,
                disk_quota_used: 10,
                disk_quota_total: 2048,
            }),
            failing: Mutex::new(HashSet::new()),
            init_calls: AtomicUsize::new(0),
            link_ack_calls: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            senders: Mutex::new(HashMap::new()),
            unsubscribed: Mutex::new(Vec::new()),
        }
    }

    /// A bridge that reports `Initialized` immediately
    pub fn initialized() -> Self {
        Self::new([LifecycleState::Initialized])
    }

    /// Override the identity values returned by the fetch methods
    pub fn with_identity(
        mut self,
        user_id: impl Into<String>,
        sdk_version: impl Into<String>,
        user_access_token: impl Into<String>,
    ) -> Self {
        self.user_id = user_id.into();
        self.sdk_version = sdk_version.into();
        self.user_access_token = user_access_token.into();
        self
    }

    /// Make `init()` report that initialization was not accepted
    pub fn rejecting_init(mut self) -> Self {
        self.accepts_init = false;
        self
    }

    /// Replace the scripted status snapshot
    pub fn set_status(&self, status: StatusSnapshot) {
        *self.status.lock().expect("status lock") = status;
    }

    /// Replace the scripted quota usage
    pub fn set_quota(&self, quota: QuotaUsage) {
        *self.quota.lock().expect("quota lock") = quota;
    }

    /// Make the named fetch stage fail with a transport error
    ///
    /// Stage names match the `SdkBridge` method names, e.g. `"user_id"`.
    pub fn fail_on(&self, stage: &'static str) {
        self.failing.lock().expect("failing lock").insert(stage);
    }

    /// Push an event to whoever is subscribed to its channel
    pub async fn emit(&self, event: SdkEvent) -> Result<()> {
        let sender = {
            let senders = self.senders.lock().expect("senders lock");
            senders.get(&event.channel()).cloned()
        };
        match sender {
            Some(tx) => tx.send(event).await.map_err(|_| BridgeError::ChannelClosed),
            None => Err(BridgeError::ChannelClosed),
        }
    }

    /// How many times `init()` was called
    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    /// How many times the link acknowledgment was sent
    pub fn link_ack_calls(&self) -> usize {
        self.link_ack_calls.load(Ordering::SeqCst)
    }

    /// Ids that have been released via `unsubscribe`
    pub fn unsubscribed(&self) -> Vec<SubscriptionId> {
        self.unsubscribed.lock().expect("unsubscribed lock").clone()
    }

    fn maybe_fail(&self, stage: &'static str) -> Result<()> {
        if self.failing.lock().expect("failing lock").contains(stage) {
            return Err(BridgeError::Transport(format!("scripted failure: {stage}")));
        }
        Ok(())
    }
}

#[async_trait]
impl SdkBridge for ScriptedBridge {
    async fn check_init_status(&self) -> Result<LifecycleState> {
        self.maybe_fail("check_init_status")?;
        let mut queue = self.lifecycle.lock().expect("lifecycle lock");
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap_or(LifecycleState::Unknown))
        } else {
            Ok(queue.front().copied().unwrap_or(LifecycleState::Unknown))
        }
    }

    async fn init(&self) -> Result<bool> {
        self.maybe_fail("init")?;
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accepts_init)
    }

    async fn user_id(&self) -> Result<String> {
        self.maybe_fail("user_id")?;
        Ok(self.user_id.clone())
    }

    async fn sdk_version(&self) -> Result<String> {
        self.maybe_fail("sdk_version")?;
        Ok(self.sdk_version.clone())
    }

    async fn user_access_token(&self) -> Result<String> {
        self.maybe_fail("user_access_token")?;
        Ok(self.user_access_token.clone())
    }

    async fn sdk_status(&self) -> Result<StatusSnapshot> {
        self.maybe_fail("sdk_status")?;
        Ok(self.status.lock().expect("status lock").clone())
    }

    async fn quota_data(&self) -> Result<QuotaUsage> {
        self.maybe_fail("quota_data")?;
        Ok(*self.quota.lock().expect("quota lock"))
    }

    async fn send_user_link_callback(&self) -> Result<()> {
        self.maybe_fail("send_user_link_callback")?;
        self.link_ack_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl EventSource for ScriptedBridge {
    async fn subscribe(&self, channel: EventChannel) -> Result<Subscription> {
        self.maybe_fail("subscribe")?;
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.senders.lock().expect("senders lock").insert(channel, tx);
        Ok(Subscription::new(id, rx))
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        self.maybe_fail("unsubscribe")?;
        self.unsubscribed.lock().expect("unsubscribed lock").push(id);
        Ok(())
    }
}
