use thiserror::Error;

use crate::event::EventChannel;

/// Errors that can occur at the SDK bridge boundary
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The underlying transport to the SDK failed
    #[error("bridge transport error: {0}")]
    Transport(String),

    /// An event payload did not match its channel's expected shape
    #[error("failed to decode {channel} payload: {source}")]
    Decode {
        channel: EventChannel,
        #[source]
        source: serde_json::Error,
    },

    /// An event arrived on a channel name this crate does not know
    #[error("unknown event channel: {0}")]
    UnknownChannel(String),

    /// The event channel for a subscription has been closed
    #[error("event channel has been closed")]
    ChannelClosed,
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
