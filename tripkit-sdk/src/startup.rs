//! One-time startup synchronization
//!
//! Runs once the SDK is confirmed initialized. Ordering is a correctness
//! requirement, not a style choice: identity before quotas, and both before
//! any event subscription is attached, so that no push can touch a field
//! that has no initial value yet. Consumers assume identity fields are
//! populated once `initialized` is true.

use std::sync::Arc;

use tripkit_bridge::{EventSource, QuotaUsage, SdkBridge, StatusSnapshot};
use tripkit_state::{QuotaView, SharedState, StateUpdate};

use crate::error::SyncError;
use crate::subscriptions::SubscriptionManager;

/// Combine a pushed/pulled status snapshot with usage figures
pub(crate) fn quota_update(snapshot: &StatusSnapshot, usage: &QuotaUsage) -> StateUpdate {
    StateUpdate::Quotas {
        wifi: QuotaView::new(
            snapshot.wifi_quota_status.clone(),
            usage.wifi_quota_used,
            usage.wifi_quota_total,
        ),
        mobile: QuotaView::new(
            snapshot.mobile_quota_status.clone(),
            usage.mobile_quota_used,
            usage.mobile_quota_total,
        ),
        disk: QuotaView::new(
            snapshot.disk_quota_status.clone(),
            usage.disk_quota_used,
            usage.disk_quota_total,
        ),
    }
}

/// Pulls the initial identity and quota data, then hands off to the
/// subscription manager for ongoing push updates
pub struct StartupSynchronizer<B> {
    bridge: Arc<B>,
    state: SharedState,
    subscriptions: Arc<SubscriptionManager<B>>,
}

impl<B: SdkBridge + EventSource + 'static> StartupSynchronizer<B> {
    pub fn new(
        bridge: Arc<B>,
        state: SharedState,
        subscriptions: Arc<SubscriptionManager<B>>,
    ) -> Self {
        Self {
            bridge,
            state,
            subscriptions,
        }
    }

    /// Run the ordered pull sequence, then attach the event channels
    ///
    /// Any failure aborts the remainder of the sequence. Fields already
    /// applied stay; everything after the failure stays pending. Nothing is
    /// ever surfaced as complete when it is not.
    pub async fn run_startup_sequence(&self) -> Result<(), SyncError> {
        let user_id = self
            .bridge
            .user_id()
            .await
            .map_err(|e| SyncError::fetch("user id", e))?;
        let sdk_version = self
            .bridge
            .sdk_version()
            .await
            .map_err(|e| SyncError::fetch("sdk version", e))?;
        let user_access_token = self
            .bridge
            .user_access_token()
            .await
            .map_err(|e| SyncError::fetch("access token", e))?;

        // Identity lands as one unit, only after all three fetches resolved
        self.state.apply(StateUpdate::Identity {
            user_id,
            sdk_version,
            user_access_token,
        });
        tracing::debug!("startup identity synchronized");

        let snapshot = self
            .bridge
            .sdk_status()
            .await
            .map_err(|e| SyncError::fetch("status snapshot", e))?;
        let usage = self
            .bridge
            .quota_data()
            .await
            .map_err(|e| SyncError::fetch("quota data", e))?;
        self.state.apply(quota_update(&snapshot, &usage));
        tracing::debug!("startup quotas synchronized");

        // Only now may pushes start flowing
        self.subscriptions.attach_all().await?;
        tracing::info!("startup sequence complete, event channels live");

        Ok(())
    }
}
