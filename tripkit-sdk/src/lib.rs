//! # tripkit-sdk
//!
//! Orchestration layer reconciling local application state with the
//! lifecycle of an asynchronously-initializing mobility-tracking SDK.
//!
//! ## Overview
//!
//! The external SDK initializes on its own schedule, answers pull queries
//! and pushes events. This crate owns the only control flow in the system:
//!
//! 1. [`InitController`] reads the SDK's self-reported lifecycle state and
//!    drives the correct transition — request initialization, wait with
//!    bounded backoff, or proceed.
//! 2. Once initialized, [`StartupSynchronizer`] pulls identity, version and
//!    quota data in a fixed order.
//! 3. Only then does [`SubscriptionManager`] attach the three event
//!    channels, each with its own retained handle, and keep
//!    `tripkit_state::AppState` synchronized from pushes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tripkit_sdk::{SdkConfig, TrackingSystem};
//!
//! let system = TrackingSystem::new(bridge, SdkConfig::default())?;
//! system.start().await?;
//!
//! let state = system.state();
//! println!("initialized: {}", state.initialized);
//!
//! system.shutdown().await;
//! ```
//!
//! ## Concurrency model
//!
//! All bridge calls are async suspension points; event callbacks run on
//! their own tokio tasks and may interleave with any in-flight chain. The
//! ordering that matters — startup pulls complete before any push can land —
//! is enforced structurally: subscriptions are attached as the last step of
//! the startup sequence. Overlapping quota recomputations resolve
//! last-write-wins, which is safe because each update is self-contained.

pub mod config;
pub mod error;
pub mod init;
pub mod startup;
pub mod subscriptions;
pub mod system;

// Re-export main types for convenience
pub use config::SdkConfig;
pub use error::{InitError, SubscriptionError, SyncError};
pub use init::InitController;
pub use startup::StartupSynchronizer;
pub use subscriptions::SubscriptionManager;
pub use system::TrackingSystem;

// Re-export commonly used types from the boundary crates
pub use tripkit_bridge::{
    EventChannel, EventSource, LifecycleState, SdkBridge, SdkEvent, SubscriptionId,
};
pub use tripkit_state::{AppState, QuotaView, SharedState, StateUpdate, TripType};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::{
        AppState, EventChannel, EventSource, InitError, LifecycleState, SdkBridge, SdkConfig,
        SdkEvent, SharedState, SubscriptionError, SubscriptionManager, SyncError, TrackingSystem,
        TripType,
    };
}
