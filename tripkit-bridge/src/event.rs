//! Named event channels and their typed payloads
//!
//! The bridge pushes events as a channel name plus a JSON payload. Each
//! channel has exactly one payload shape, so the two are fused into the
//! [`SdkEvent`] discriminated union at the decode boundary — downstream code
//! never inspects raw JSON.

use serde::Deserialize;

use crate::error::{BridgeError, Result};
use crate::types::StatusSnapshot;

/// The three event channels the SDK emits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Quota status changed (`SDKStatusUpdate`)
    StatusUpdate,
    /// Movement activity classification changed (`SDKUserActivityUpdate`)
    UserActivity,
    /// The install was linked to a user account (`SDKUserLink`)
    UserLink,
}

impl EventChannel {
    /// Every channel, in subscription order
    pub const ALL: [EventChannel; 3] = [
        EventChannel::StatusUpdate,
        EventChannel::UserActivity,
        EventChannel::UserLink,
    ];

    /// The wire name the bridge uses for this channel
    pub fn name(&self) -> &'static str {
        match self {
            EventChannel::StatusUpdate => "SDKStatusUpdate",
            EventChannel::UserActivity => "SDKUserActivityUpdate",
            EventChannel::UserLink => "SDKUserLink",
        }
    }

    /// Resolve a wire name back to its channel
    pub fn from_name(name: &str) -> Result<Self> {
        EventChannel::ALL
            .into_iter()
            .find(|channel| channel.name() == name)
            .ok_or_else(|| BridgeError::UnknownChannel(name.to_string()))
    }
}

impl std::fmt::Display for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A decoded event from the bridge, keyed by channel
#[derive(Debug, Clone, PartialEq)]
pub enum SdkEvent {
    /// Fresh quota status labels; usage figures are pulled separately
    StatusUpdate(StatusSnapshot),
    /// Raw activity code for the current movement classification
    UserActivity { activity_type: i64 },
    /// The bridge generated an install id awaiting server-side linking
    UserLink { install_id: String },
}

#[derive(Deserialize)]
struct UserActivityPayload {
    #[serde(rename = "type")]
    activity_type: i64,
}

#[derive(Deserialize)]
struct UserLinkPayload {
    #[serde(rename = "installId")]
    install_id: String,
}

impl SdkEvent {
    /// Decode a raw payload for the given channel
    pub fn decode(channel: EventChannel, payload: &serde_json::Value) -> Result<Self> {
        let decode_err = |source| BridgeError::Decode { channel, source };
        match channel {
            EventChannel::StatusUpdate => {
                let snapshot: StatusSnapshot =
                    serde_json::from_value(payload.clone()).map_err(decode_err)?;
                Ok(SdkEvent::StatusUpdate(snapshot))
            }
            EventChannel::UserActivity => {
                let raw: UserActivityPayload =
                    serde_json::from_value(payload.clone()).map_err(decode_err)?;
                Ok(SdkEvent::UserActivity {
                    activity_type: raw.activity_type,
                })
            }
            EventChannel::UserLink => {
                let raw: UserLinkPayload =
                    serde_json::from_value(payload.clone()).map_err(decode_err)?;
                Ok(SdkEvent::UserLink {
                    install_id: raw.install_id,
                })
            }
        }
    }

    /// Decode a raw event by wire name
    pub fn decode_named(name: &str, payload: &serde_json::Value) -> Result<Self> {
        SdkEvent::decode(EventChannel::from_name(name)?, payload)
    }

    /// The channel this event belongs to
    pub fn channel(&self) -> EventChannel {
        match self {
            SdkEvent::StatusUpdate(_) => EventChannel::StatusUpdate,
            SdkEvent::UserActivity { .. } => EventChannel::UserActivity,
            SdkEvent::UserLink { .. } => EventChannel::UserLink,
        }
    }
}
