//! # tripkit-bridge
//!
//! Typed boundary over the mobility-tracking SDK bridge.
//!
//! The external SDK initializes asynchronously, answers pull-style queries
//! (lifecycle state, user identity, quota snapshots) and pushes named events
//! with JSON payloads. This crate owns that boundary:
//!
//! - [`SdkBridge`] — the async query/command surface of the bridge
//! - [`EventSource`] — per-channel event subscriptions with retained handles
//! - [`SdkEvent`] — a discriminated union of the three event channels, so no
//!   payload shape is ever guessed at a callback boundary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tripkit_bridge::{EventChannel, EventSource, SdkBridge};
//!
//! let state = bridge.check_init_status().await?;
//! let mut sub = bridge.subscribe(EventChannel::StatusUpdate).await?;
//! while let Some(event) = sub.events.recv().await {
//!     println!("push: {:?}", event);
//! }
//! bridge.unsubscribe(sub.id).await?;
//! ```
//!
//! Implementations of the two traits talk to whatever transport hosts the
//! real SDK; the [`testing`] module (behind the `test-support` feature)
//! provides a fully scripted in-memory implementation.

pub mod bridge;
pub mod error;
pub mod event;
pub mod subscription;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use bridge::{EventSource, SdkBridge};
pub use error::{BridgeError, Result};
pub use event::{EventChannel, SdkEvent};
pub use subscription::{Subscription, SubscriptionId};
pub use types::{LifecycleState, QuotaUsage, StatusSnapshot};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::{
        BridgeError, EventChannel, EventSource, LifecycleState, QuotaUsage, Result, SdkBridge,
        SdkEvent, StatusSnapshot, Subscription, SubscriptionId,
    };
}
