//! TrackingSystem - Main entry point for the SDK
//!
//! Owns the bridge, the shared application state and the subscription
//! manager, and exposes the whole lifecycle as three calls: `start`,
//! `state`, `shutdown`.

use std::sync::Arc;

use tripkit_bridge::{EventSource, SdkBridge};
use tripkit_state::{AppState, SharedState};

use crate::config::SdkConfig;
use crate::error::InitError;
use crate::init::InitController;
use crate::subscriptions::SubscriptionManager;

/// Main system entry point
///
/// # Example
///
/// ```rust,ignore
/// use tripkit_sdk::{SdkConfig, TrackingSystem};
///
/// let system = TrackingSystem::new(bridge, SdkConfig::default())?;
/// system.start().await?;
///
/// let state = system.state();
/// println!("user: {:?}", state.user_id);
/// if let Some(wifi) = &state.quotas.wifi {
///     println!("wifi quota: {wifi}");
/// }
///
/// system.shutdown().await;
/// ```
pub struct TrackingSystem<B> {
    bridge: Arc<B>,
    state: SharedState,
    subscriptions: Arc<SubscriptionManager<B>>,
    config: SdkConfig,
}

impl<B: SdkBridge + EventSource + 'static> TrackingSystem<B> {
    /// Create a system over the given bridge
    pub fn new(bridge: B, config: SdkConfig) -> Result<Self, InitError> {
        config.validate()?;

        let bridge = Arc::new(bridge);
        let state = SharedState::new();
        let subscriptions = Arc::new(SubscriptionManager::new(
            Arc::clone(&bridge),
            state.clone(),
        ));

        Ok(Self {
            bridge,
            state,
            subscriptions,
            config,
        })
    }

    /// Create a system with the default configuration
    pub fn with_defaults(bridge: B) -> Result<Self, InitError> {
        Self::new(bridge, SdkConfig::default())
    }

    /// Drive initialization to completion and bring the event channels up
    ///
    /// Safe to call again after a failure; the controller re-reads the
    /// bridge's lifecycle state each time.
    pub async fn start(&self) -> Result<(), InitError> {
        InitController::new(
            Arc::clone(&self.bridge),
            self.state.clone(),
            Arc::clone(&self.subscriptions),
            self.config.clone(),
        )
        .determine_and_advance()
        .await
    }

    /// Snapshot of the current application state
    ///
    /// `None` fields are pending, not empty — render them as "not yet
    /// known".
    pub fn state(&self) -> AppState {
        self.state.snapshot()
    }

    /// The shared state handle, for callers that poll or forward it
    pub fn shared_state(&self) -> SharedState {
        self.state.clone()
    }

    /// The subscription manager, for advanced lifecycle control
    pub fn subscriptions(&self) -> &Arc<SubscriptionManager<B>> {
        &self.subscriptions
    }

    /// The underlying bridge
    pub fn bridge(&self) -> &Arc<B> {
        &self.bridge
    }

    /// Release all event subscriptions
    ///
    /// In-flight fetches are not force-cancelled; their results are simply
    /// discarded once the channels are down.
    pub async fn shutdown(&self) {
        self.subscriptions.release_all().await;
        tracing::info!("tracking system shut down");
    }
}
