//! The application state record and its reducer
//!
//! [`AppState`] is the single mutable resource the whole SDK synchronizes
//! into. It is only ever changed through [`AppState::apply`], which takes a
//! [`StateUpdate`] — pure old-state-plus-event mutation, decoupled from any
//! rendering concern. [`SharedState`] wraps the record for concurrent access
//! from event-forwarding tasks.
//!
//! Invariant: `quotas` and `trip_type` are only meaningful once
//! `initialized` is true, and every `Option` field reads as "not yet known"
//! while `None` — never as zero or as an error.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::quota::QuotaView;
use crate::trip::TripType;

/// Quota views per network medium
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Quotas {
    pub wifi: Option<QuotaView>,
    pub mobile: Option<QuotaView>,
    pub disk: Option<QuotaView>,
}

/// Everything the application knows about the SDK right now
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    /// The SDK has confirmed it is initialized
    pub initialized: bool,
    pub user_id: Option<String>,
    pub install_id: Option<String>,
    pub sdk_version: Option<String>,
    pub user_access_token: Option<String>,
    pub quotas: Quotas,
    pub trip_type: Option<TripType>,
}

/// One state transition: old state + update -> new state
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// The SDK's initialized flag was confirmed (or withdrawn)
    Initialized(bool),
    /// The startup identity fetches completed as one unit
    Identity {
        user_id: String,
        sdk_version: String,
        user_access_token: String,
    },
    /// Fresh quota views for all three media
    Quotas {
        wifi: QuotaView,
        mobile: QuotaView,
        disk: QuotaView,
    },
    /// A new trip classification arrived
    TripType(TripType),
    /// The bridge reported an install id for user linking
    InstallId(String),
}

impl AppState {
    /// Apply one update in place
    ///
    /// Updates are self-contained and idempotent; applying the same update
    /// twice yields the same state, so overlapping recomputations can safely
    /// resolve last-write-wins.
    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::Initialized(initialized) => {
                self.initialized = initialized;
            }
            StateUpdate::Identity {
                user_id,
                sdk_version,
                user_access_token,
            } => {
                self.user_id = Some(user_id);
                self.sdk_version = Some(sdk_version);
                self.user_access_token = Some(user_access_token);
            }
            StateUpdate::Quotas { wifi, mobile, disk } => {
                self.quotas.wifi = Some(wifi);
                self.quotas.mobile = Some(mobile);
                self.quotas.disk = Some(disk);
            }
            StateUpdate::TripType(trip_type) => {
                self.trip_type = Some(trip_type);
            }
            StateUpdate::InstallId(install_id) => {
                self.install_id = Some(install_id);
            }
        }
    }
}

/// Cheaply cloneable handle to the shared [`AppState`]
///
/// Writers funnel through [`SharedState::apply`]; readers take whole-record
/// snapshots. The lock is held only for the copy, never across an await.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<AppState>>,
}

impl SharedState {
    /// Create an empty shared state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update to the shared record
    pub fn apply(&self, update: StateUpdate) {
        tracing::trace!(?update, "applying state update");
        self.inner.write().apply(update);
    }

    /// Clone the current state
    pub fn snapshot(&self) -> AppState {
        self.inner.read().clone()
    }
}
