//! Data types reported by the SDK bridge
//!
//! These mirror the bridge's wire shapes exactly; field names follow the
//! bridge's camelCase JSON keys via serde renaming.

use serde::{Deserialize, Serialize};

/// Lifecycle phase the SDK reports for itself
///
/// Authoritative — always taken from the bridge, never derived locally.
/// Raw strings the bridge emits that we do not recognize map to `Unknown`
/// so callers can surface the condition instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// The SDK has never been started on this install
    NotInitialized,
    /// Initialization has been requested and is still running
    InitInProgress,
    /// The SDK is fully initialized and serving data
    Initialized,
    /// The bridge reported a state this crate does not recognize
    Unknown,
}

impl LifecycleState {
    /// Parse the bridge's raw status string
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "SDK_NOT_INITIALIZED" => LifecycleState::NotInitialized,
            "SDK_INIT_IN_PROGRESS" => LifecycleState::InitInProgress,
            "SDK_INITIALIZED" => LifecycleState::Initialized,
            other => {
                tracing::debug!("unrecognized lifecycle state from bridge: {other}");
                LifecycleState::Unknown
            }
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LifecycleState::NotInitialized => "not-initialized",
            LifecycleState::InitInProgress => "init-in-progress",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

/// Per-medium quota status labels, as pushed by the bridge
///
/// This is the payload of the `SDKStatusUpdate` event and the result of the
/// bridge's status snapshot query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub wifi_quota_status: String,
    pub mobile_quota_status: String,
    pub disk_quota_status: String,
}

/// Per-medium quota usage figures in kilobytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaUsage {
    pub wifi_quota_used: u64,
    pub wifi_quota_total: u64,
    pub mobile_quota_used: u64,
    pub mobile_quota_total: u64,
    pub disk_quota_used: u64,
    pub disk_quota_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_parses_known_states() {
        assert_eq!(
            LifecycleState::from_raw("SDK_NOT_INITIALIZED"),
            LifecycleState::NotInitialized
        );
        assert_eq!(
            LifecycleState::from_raw("SDK_INIT_IN_PROGRESS"),
            LifecycleState::InitInProgress
        );
        assert_eq!(
            LifecycleState::from_raw("SDK_INITIALIZED"),
            LifecycleState::Initialized
        );
    }

    #[test]
    fn from_raw_maps_unrecognized_to_unknown() {
        assert_eq!(LifecycleState::from_raw(""), LifecycleState::Unknown);
        assert_eq!(
            LifecycleState::from_raw("SDK_RESETTING"),
            LifecycleState::Unknown
        );
    }

    #[test]
    fn status_snapshot_deserializes_camel_case() {
        let snapshot: StatusSnapshot = serde_json::from_str(
            r#"{"wifiQuotaStatus":"OK","mobileQuotaStatus":"WARNING","diskQuotaStatus":"OK"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.wifi_quota_status, "OK");
        assert_eq!(snapshot.mobile_quota_status, "WARNING");
    }

    #[test]
    fn quota_usage_deserializes_camel_case() {
        let usage: QuotaUsage = serde_json::from_str(
            r#"{
                "wifiQuotaUsed": 120, "wifiQuotaTotal": 500,
                "mobileQuotaUsed": 30, "mobileQuotaTotal": 100,
                "diskQuotaUsed": 0, "diskQuotaTotal": 2048
            }"#,
        )
        .unwrap();
        assert_eq!(usage.wifi_quota_used, 120);
        assert_eq!(usage.disk_quota_total, 2048);
    }
}
