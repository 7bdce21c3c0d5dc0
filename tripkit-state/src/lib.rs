//! # tripkit-state
//!
//! The application-side view of the mobility SDK: one mutable [`AppState`]
//! record, updated exclusively through the [`StateUpdate`] reducer union.
//!
//! `AppState` is a synchronization cache, not a store of record — it is
//! created empty at process start, filled in as the SDK confirms itself and
//! pushes events, and discarded at teardown. Absent fields mean "not yet
//! known"; readers must render them as pending, never as zero or as an
//! error.
//!
//! ```rust
//! use tripkit_state::{AppState, StateUpdate};
//!
//! let mut state = AppState::default();
//! state.apply(StateUpdate::Initialized(true));
//! state.apply(StateUpdate::InstallId("abc123".to_string()));
//! assert_eq!(state.install_id.as_deref(), Some("abc123"));
//! ```
//!
//! The two pure helpers live here as well: [`format_quota`] renders a quota
//! usage line, and [`TripType::classify`] maps raw activity codes to trip
//! labels.

pub mod app_state;
pub mod quota;
pub mod trip;

mod trip_table;

pub use app_state::{AppState, Quotas, SharedState, StateUpdate};
pub use quota::{format_quota, QuotaView};
pub use trip::TripType;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::{format_quota, AppState, QuotaView, Quotas, SharedState, StateUpdate, TripType};
}
