use thiserror::Error;

use tripkit_bridge::{BridgeError, EventChannel};

/// Errors from driving the SDK's initialization state machine
#[derive(Error, Debug)]
pub enum InitError {
    /// The bridge reported a lifecycle state this layer does not recognize
    #[error("bridge reported an unrecognized lifecycle state")]
    UnrecognizedState,

    /// Initialization never resolved within the configured retry budget
    #[error("initialization still pending after {attempts} lifecycle checks")]
    PendingRetryExceeded { attempts: u32 },

    /// The bridge refused to start initializing
    #[error("bridge rejected the initialization request")]
    InitRejected,

    /// A bridge call failed
    #[error("bridge call failed: {0}")]
    Bridge(#[from] BridgeError),

    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors from the one-time startup synchronization sequence
///
/// These are recovered at the controller boundary: the sequence aborts,
/// `initialized` stays true, and derived fields stay pending.
#[derive(Error, Debug)]
pub enum SyncError {
    /// One of the ordered startup fetches failed
    #[error("startup fetch failed at {stage}: {source}")]
    FetchFailed {
        stage: &'static str,
        #[source]
        source: BridgeError,
    },

    /// Attaching the event subscriptions failed
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

impl SyncError {
    pub(crate) fn fetch(stage: &'static str, source: BridgeError) -> Self {
        SyncError::FetchFailed { stage, source }
    }
}

/// Errors from the event subscription manager
#[derive(Error, Debug)]
pub enum SubscriptionError {
    /// `attach_all` was called while a channel already holds a live handle
    #[error("event channel {0} is already attached")]
    AlreadyAttached(EventChannel),

    /// A bridge subscribe call failed
    #[error("bridge call failed: {0}")]
    Bridge(#[from] BridgeError),
}
