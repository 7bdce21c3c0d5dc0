//! The async traits implemented by a concrete SDK bridge
//!
//! All methods suspend until the external bridge resolves; none of them
//! block. Pure computation (formatting, classification) never goes through
//! these traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::event::EventChannel;
use crate::subscription::{Subscription, SubscriptionId};
use crate::types::{LifecycleState, QuotaUsage, StatusSnapshot};

/// Query/command surface of the mobility-tracking SDK bridge
///
/// # Example
///
/// ```rust,ignore
/// use tripkit_bridge::{LifecycleState, SdkBridge};
///
/// match bridge.check_init_status().await? {
///     LifecycleState::Initialized => { /* pull startup data */ }
///     LifecycleState::NotInitialized => {
///         // success means initialization *started*, not completed
///         let started = bridge.init().await?;
///     }
///     other => tracing::debug!("lifecycle: {other}"),
/// }
/// ```
#[async_trait]
pub trait SdkBridge: Send + Sync {
    /// The SDK's self-reported lifecycle state
    async fn check_init_status(&self) -> Result<LifecycleState>;

    /// Ask the SDK to start initializing
    ///
    /// `true` means initialization was accepted and is now in progress;
    /// completion must be observed through `check_init_status` or a status
    /// push, never assumed from this return value.
    async fn init(&self) -> Result<bool>;

    /// The SDK's user identifier
    async fn user_id(&self) -> Result<String>;

    /// The SDK's own version string
    async fn sdk_version(&self) -> Result<String>;

    /// The user access token for bridge-authenticated calls
    async fn user_access_token(&self) -> Result<String>;

    /// Current quota status snapshot
    async fn sdk_status(&self) -> Result<StatusSnapshot>;

    /// Current quota usage figures
    async fn quota_data(&self) -> Result<QuotaUsage>;

    /// Acknowledge a completed install-link back to the SDK
    ///
    /// Fire-and-forget from the caller's perspective; the server-side
    /// linking call itself happens outside this boundary.
    async fn send_user_link_callback(&self) -> Result<()>;
}

/// Event subscription surface of the bridge
///
/// Each `subscribe` yields a fresh [`Subscription`] with its own id. The
/// bridge does not police one-subscription-per-channel; callers that need
/// that invariant (the tripkit subscription manager does) enforce it above
/// this boundary.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Open a subscription to one event channel
    async fn subscribe(&self, channel: EventChannel) -> Result<Subscription>;

    /// Release a previously opened subscription
    async fn unsubscribe(&self, id: SubscriptionId) -> Result<()>;
}
