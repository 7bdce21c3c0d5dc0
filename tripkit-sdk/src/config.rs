//! Configuration for the orchestration layer
//!
//! The one genuinely open policy in this system is how long to wait for an
//! initialization that the bridge reports as in progress. The answer is
//! parameterized here: poll with exponential backoff, bounded by a maximum
//! interval and a maximum number of checks.

use std::time::Duration;

use crate::error::InitError;

/// Configuration for [`TrackingSystem`](crate::TrackingSystem)
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Delay before the first lifecycle re-check
    /// Default: 2 seconds
    pub init_poll_interval: Duration,

    /// Multiplier applied to the re-check delay after each attempt
    /// Default: 2.0
    pub init_backoff_multiplier: f64,

    /// Upper bound on the re-check delay
    /// Default: 30 seconds
    pub init_max_poll_interval: Duration,

    /// Maximum number of lifecycle checks before declaring failure
    /// Default: 10
    pub init_max_attempts: u32,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            init_poll_interval: Duration::from_secs(2),
            init_backoff_multiplier: 2.0,
            init_max_poll_interval: Duration::from_secs(30),
            init_max_attempts: 10,
        }
    }
}

impl SdkConfig {
    /// Create a new SdkConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// An SdkConfig that gives up quickly, for interactive flows
    pub fn fast_retry() -> Self {
        Self {
            init_poll_interval: Duration::from_millis(500),
            init_max_poll_interval: Duration::from_secs(5),
            init_max_attempts: 5,
            ..Default::default()
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.init_poll_interval = interval;
        self
    }

    pub fn with_backoff(mut self, multiplier: f64, max_interval: Duration) -> Self {
        self.init_backoff_multiplier = multiplier;
        self.init_max_poll_interval = max_interval;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.init_max_attempts = attempts;
        self
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), InitError> {
        if self.init_max_attempts == 0 {
            return Err(InitError::Config(
                "init_max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.init_poll_interval == Duration::ZERO {
            return Err(InitError::Config(
                "init_poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.init_backoff_multiplier < 1.0 {
            return Err(InitError::Config(
                "init_backoff_multiplier must be at least 1.0".to_string(),
            ));
        }

        if self.init_poll_interval > self.init_max_poll_interval {
            return Err(InitError::Config(
                "init_poll_interval must not exceed init_max_poll_interval".to_string(),
            ));
        }

        Ok(())
    }

    /// The delay to use after the given one
    pub fn next_backoff(&self, current: Duration) -> Duration {
        current
            .mul_f64(self.init_backoff_multiplier)
            .min(self.init_max_poll_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SdkConfig::default();
        assert_eq!(config.init_poll_interval, Duration::from_secs(2));
        assert_eq!(config.init_max_attempts, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(SdkConfig::default().with_max_attempts(0).validate().is_err());
        assert!(SdkConfig::default()
            .with_poll_interval(Duration::ZERO)
            .validate()
            .is_err());
        assert!(SdkConfig::default()
            .with_backoff(0.5, Duration::from_secs(30))
            .validate()
            .is_err());
        assert!(SdkConfig::default()
            .with_poll_interval(Duration::from_secs(60))
            .validate()
            .is_err());
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        let config = SdkConfig::default();
        let next = config.next_backoff(Duration::from_secs(2));
        assert_eq!(next, Duration::from_secs(4));

        let capped = config.next_backoff(Duration::from_secs(25));
        assert_eq!(capped, Duration::from_secs(30));
    }

    #[test]
    fn fast_retry_preset_is_valid() {
        let config = SdkConfig::fast_retry();
        assert_eq!(config.init_max_attempts, 5);
        assert!(config.validate().is_ok());
    }
}
