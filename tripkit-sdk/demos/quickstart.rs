//! Quickstart: drive the full lifecycle against the scripted bridge
//!
//! Run with: cargo run --example quickstart

use std::time::Duration;

use tripkit_bridge::testing::ScriptedBridge;
use tripkit_bridge::{LifecycleState, SdkEvent, StatusSnapshot};
use tripkit_sdk::{SdkConfig, TrackingSystem};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // A bridge that needs one init request and one re-check to come up
    let bridge = ScriptedBridge::new([
        LifecycleState::NotInitialized,
        LifecycleState::InitInProgress,
        LifecycleState::Initialized,
    ])
    .with_identity("user-42", "6.1.0", "token-42");

    let config = SdkConfig::default().with_poll_interval(Duration::from_millis(100));
    let system = TrackingSystem::new(bridge, config)?;

    system.start().await?;

    let state = system.state();
    println!("initialized: {}", state.initialized);
    println!("user id:     {:?}", state.user_id);
    println!("sdk version: {:?}", state.sdk_version);
    if let Some(wifi) = &state.quotas.wifi {
        println!("wifi quota:  {wifi}");
    }

    // Push some events and watch them land in the state
    system
        .bridge()
        .emit(SdkEvent::UserActivity { activity_type: 5 })
        .await?;
    system
        .bridge()
        .emit(SdkEvent::UserLink {
            install_id: "install-abc123".to_string(),
        })
        .await?;
    system
        .bridge()
        .emit(SdkEvent::StatusUpdate(StatusSnapshot {
            wifi_quota_status: "WARNING".to_string(),
            mobile_quota_status: "OK".to_string(),
            disk_quota_status: "OK".to_string(),
        }))
        .await?;

    tokio::time::sleep(Duration::from_millis(200)).await;

    let state = system.state();
    println!("trip type:   {:?}", state.trip_type);
    println!("install id:  {:?}", state.install_id);
    if let Some(wifi) = &state.quotas.wifi {
        println!("wifi quota:  {wifi}");
    }

    system.shutdown().await;
    Ok(())
}
