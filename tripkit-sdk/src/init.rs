//! The initialization state machine
//!
//! Four states, one explicit retry loop, two terminal outcomes. The SDK
//! reports its own lifecycle state; this controller only decides what to do
//! about it:
//!
//! - `NotInitialized` — ask the bridge to start initializing, then re-check;
//!   completion is observed, never assumed from `init()` returning.
//! - `InitInProgress` — re-check after a bounded exponential backoff.
//! - `Initialized` — flag the state, run the startup sequence, done.
//! - `Unknown` — fail loudly; this is never silently dropped.

use std::sync::Arc;

use tripkit_bridge::{EventSource, LifecycleState, SdkBridge};
use tripkit_state::{SharedState, StateUpdate};

use crate::config::SdkConfig;
use crate::error::InitError;
use crate::startup::StartupSynchronizer;
use crate::subscriptions::SubscriptionManager;

/// Drives the SDK from whatever lifecycle state it is in to `Initialized`
pub struct InitController<B> {
    bridge: Arc<B>,
    state: SharedState,
    subscriptions: Arc<SubscriptionManager<B>>,
    config: SdkConfig,
}

impl<B: SdkBridge + EventSource + 'static> InitController<B> {
    pub fn new(
        bridge: Arc<B>,
        state: SharedState,
        subscriptions: Arc<SubscriptionManager<B>>,
        config: SdkConfig,
    ) -> Self {
        Self {
            bridge,
            state,
            subscriptions,
            config,
        }
    }

    /// Query the lifecycle state and advance until it resolves
    ///
    /// Terminal outcomes: `Ok(())` once the SDK is initialized (startup
    /// synchronization failures are logged and non-fatal — the SDK itself is
    /// up, derived fields stay pending), or an [`InitError`] when the state
    /// machine cannot make progress.
    pub async fn determine_and_advance(&self) -> Result<(), InitError> {
        let mut delay = self.config.init_poll_interval;

        for attempt in 1..=self.config.init_max_attempts {
            match self.bridge.check_init_status().await? {
                LifecycleState::NotInitialized => {
                    tracing::info!(attempt, "SDK not initialized, requesting initialization");
                    let accepted = self.bridge.init().await?;
                    if !accepted {
                        return Err(InitError::InitRejected);
                    }
                    // Started, not finished. Fall through to the re-check wait.
                }
                LifecycleState::InitInProgress => {
                    tracing::debug!(attempt, ?delay, "initialization pending, will re-check");
                }
                LifecycleState::Initialized => {
                    self.state.apply(StateUpdate::Initialized(true));
                    tracing::info!(attempt, "SDK initialized");

                    let synchronizer = StartupSynchronizer::new(
                        Arc::clone(&self.bridge),
                        self.state.clone(),
                        Arc::clone(&self.subscriptions),
                    );
                    if let Err(error) = synchronizer.run_startup_sequence().await {
                        tracing::warn!(%error, "startup synchronization failed; derived fields stay pending");
                    }
                    return Ok(());
                }
                LifecycleState::Unknown => {
                    return Err(InitError::UnrecognizedState);
                }
            }

            tokio::time::sleep(delay).await;
            delay = self.config.next_backoff(delay);
        }

        Err(InitError::PendingRetryExceeded {
            attempts: self.config.init_max_attempts,
        })
    }
}
