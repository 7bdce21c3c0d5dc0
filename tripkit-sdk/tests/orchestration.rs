//! End-to-end orchestration tests over the scripted bridge
//!
//! Time is paused in every test, so backoff waits resolve instantly.

use std::time::Duration;

use tripkit_bridge::testing::ScriptedBridge;
use tripkit_bridge::{LifecycleState, QuotaUsage, SdkEvent, StatusSnapshot};
use tripkit_sdk::{InitError, SdkConfig, SubscriptionError, TrackingSystem};

fn fast_config() -> SdkConfig {
    SdkConfig::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_backoff(2.0, Duration::from_millis(100))
}

fn system_over(bridge: ScriptedBridge) -> TrackingSystem<ScriptedBridge> {
    TrackingSystem::new(bridge, fast_config()).expect("valid config")
}

/// Poll until the condition holds; paused time makes this effectively instant
async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}

// ============================================================================
// InitController branches
// ============================================================================

#[tokio::test(start_paused = true)]
async fn not_initialized_requests_init_then_observes_completion() {
    let system = system_over(ScriptedBridge::new([
        LifecycleState::NotInitialized,
        LifecycleState::InitInProgress,
        LifecycleState::Initialized,
    ]));

    system.start().await.expect("start succeeds");

    assert_eq!(system.bridge().init_calls(), 1);
    assert!(system.state().initialized);
}

#[tokio::test(start_paused = true)]
async fn in_progress_polls_until_initialized() {
    let system = system_over(ScriptedBridge::new([
        LifecycleState::InitInProgress,
        LifecycleState::InitInProgress,
        LifecycleState::Initialized,
    ]));

    system.start().await.expect("start succeeds");

    // Never asked to init; the SDK was already on its way
    assert_eq!(system.bridge().init_calls(), 0);
    assert!(system.state().initialized);
}

#[tokio::test(start_paused = true)]
async fn unknown_state_is_surfaced_not_swallowed() {
    let system = system_over(ScriptedBridge::new([LifecycleState::Unknown]));

    let err = system.start().await.unwrap_err();
    assert!(matches!(err, InitError::UnrecognizedState));
    assert!(!system.state().initialized);
}

#[tokio::test(start_paused = true)]
async fn pending_forever_exhausts_the_retry_budget() {
    let bridge = ScriptedBridge::new([LifecycleState::InitInProgress]);
    let config = fast_config().with_max_attempts(3);
    let system = TrackingSystem::new(bridge, config).expect("valid config");

    let err = system.start().await.unwrap_err();
    assert!(matches!(err, InitError::PendingRetryExceeded { attempts: 3 }));
}

#[tokio::test(start_paused = true)]
async fn rejected_init_is_terminal() {
    let system = system_over(
        ScriptedBridge::new([LifecycleState::NotInitialized]).rejecting_init(),
    );

    let err = system.start().await.unwrap_err();
    assert!(matches!(err, InitError::InitRejected));
    assert_eq!(system.bridge().init_calls(), 1);
}

// ============================================================================
// Startup synchronization
// ============================================================================

#[tokio::test(start_paused = true)]
async fn startup_pulls_identity_and_quotas_then_attaches() {
    let bridge = ScriptedBridge::initialized().with_identity("user-42", "6.1.0", "tok-9");
    let system = system_over(bridge);

    system.start().await.expect("start succeeds");

    let state = system.state();
    assert!(state.initialized);
    assert_eq!(state.user_id.as_deref(), Some("user-42"));
    assert_eq!(state.sdk_version.as_deref(), Some("6.1.0"));
    assert_eq!(state.user_access_token.as_deref(), Some("tok-9"));
    assert_eq!(
        state.quotas.wifi.as_ref().map(ToString::to_string),
        Some("OK : 120/500 (kb)".to_string())
    );
    assert_eq!(system.subscriptions().attached_ids().await.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn aborted_startup_leaves_every_field_pending() {
    let bridge = ScriptedBridge::initialized();
    bridge.fail_on("user_id");
    let system = system_over(bridge);

    // Startup failure is non-fatal: the SDK itself is initialized
    system.start().await.expect("start still succeeds");

    let state = system.state();
    assert!(state.initialized);
    assert!(state.user_id.is_none());
    assert!(state.sdk_version.is_none());
    assert!(state.quotas.wifi.is_none());
    assert!(state.quotas.mobile.is_none());
    assert!(state.quotas.disk.is_none());
    // No push may land before its field has an initial value
    assert!(!system.subscriptions().is_attached().await);
}

#[tokio::test(start_paused = true)]
async fn mid_sequence_abort_keeps_completed_units_only() {
    let bridge = ScriptedBridge::initialized();
    bridge.fail_on("quota_data");
    let system = system_over(bridge);

    system.start().await.expect("start still succeeds");

    let state = system.state();
    assert!(state.initialized);
    // Identity completed as a unit before the failure
    assert!(state.user_id.is_some());
    // Quotas never resolved and stay pending, not zeroed
    assert!(state.quotas.wifi.is_none());
    assert!(!system.subscriptions().is_attached().await);
}

// ============================================================================
// Subscription lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn second_attach_fails_and_keeps_first_handles_live() {
    let system = system_over(ScriptedBridge::initialized());
    system.start().await.expect("start succeeds");

    let err = system.subscriptions().attach_all().await.unwrap_err();
    assert!(matches!(err, SubscriptionError::AlreadyAttached(_)));

    // The original channel still delivers
    system
        .bridge()
        .emit(SdkEvent::UserActivity { activity_type: 2 })
        .await
        .expect("subscriber present");
    let shared = system.shared_state();
    wait_for(|| shared.snapshot().trip_type.is_some()).await;
    assert_eq!(
        system.state().trip_type.map(|t| t.label()),
        Some("walking")
    );
}

#[tokio::test(start_paused = true)]
async fn release_all_releases_three_distinct_handles() {
    let system = system_over(ScriptedBridge::initialized());
    system.start().await.expect("start succeeds");

    let attached = system.subscriptions().attached_ids().await;
    assert_eq!(attached.len(), 3);

    system.shutdown().await;

    let released = system.bridge().unsubscribed();
    assert_eq!(released.len(), 3);
    for id in &attached {
        assert!(released.contains(id));
    }
    assert!(!system.subscriptions().is_attached().await);
}

// ============================================================================
// Push-driven synchronization
// ============================================================================

#[tokio::test(start_paused = true)]
async fn status_push_recomputes_quota_views() {
    let system = system_over(ScriptedBridge::initialized());
    system.start().await.expect("start succeeds");

    system.bridge().set_quota(QuotaUsage {
        wifi_quota_used: 450,
        wifi_quota_total: 500,
        mobile_quota_used: 30,
        mobile_quota_total: 100,
        disk_quota_used: 10,
        disk_quota_total: 2048,
    });
    system
        .bridge()
        .emit(SdkEvent::StatusUpdate(StatusSnapshot {
            wifi_quota_status: "WARNING".to_string(),
            mobile_quota_status: "OK".to_string(),
            disk_quota_status: "OK".to_string(),
        }))
        .await
        .expect("subscriber present");

    let shared = system.shared_state();
    wait_for(|| {
        shared
            .snapshot()
            .quotas
            .wifi
            .is_some_and(|q| q.status_label == "WARNING")
    })
    .await;
    assert_eq!(
        system.state().quotas.wifi.map(|q| q.to_string()),
        Some("WARNING : 450/500 (kb)".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn user_link_stores_install_id_and_acks_exactly_once() {
    let system = system_over(ScriptedBridge::initialized());
    system.start().await.expect("start succeeds");

    system
        .bridge()
        .emit(SdkEvent::UserLink {
            install_id: "abc123".to_string(),
        })
        .await
        .expect("subscriber present");

    let shared = system.shared_state();
    wait_for(|| shared.snapshot().install_id.is_some()).await;

    assert_eq!(system.state().install_id.as_deref(), Some("abc123"));
    assert_eq!(system.bridge().link_ack_calls(), 1);

    // A second distinct event gets its own acknowledgment
    system
        .bridge()
        .emit(SdkEvent::UserLink {
            install_id: "def456".to_string(),
        })
        .await
        .expect("subscriber present");
    let bridge = system.bridge();
    wait_for(|| bridge.link_ack_calls() == 2).await;
    assert_eq!(system.state().install_id.as_deref(), Some("def456"));
}
