//! Refresh pipeline configuration
//!
//! All knobs default to the values in [`crate::constants`]; hosts that load
//! configuration from a file get the same defaults for any omitted field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{cache, timing};

fn default_max_retries() -> u32 {
    timing::MAX_RETRIES
}

fn default_attempt_timeout_secs() -> u64 {
    timing::ATTEMPT_TIMEOUT_SECS
}

fn default_refresh_interval_secs() -> u64 {
    timing::REFRESH_INTERVAL_SECS
}

fn default_failure_backoff_secs() -> u64 {
    timing::FAILURE_BACKOFF_SECS
}

fn default_cache_key() -> String {
    cache::KEY.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    cache::TTL_SECS
}

/// Configuration for the refresh orchestrator and schedule policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Extra fetch attempts after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-attempt fetch timeout in seconds
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Normal refresh cadence in seconds
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Backoff after a service failure in seconds
    #[serde(default = "default_failure_backoff_secs")]
    pub failure_backoff_secs: u64,

    /// Logical cache key for the overview surface
    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// Cache entry lifetime in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            failure_backoff_secs: default_failure_backoff_secs(),
            cache_key: default_cache_key(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl RefreshConfig {
    /// Per-attempt timeout as a [`Duration`]
    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    /// Normal refresh cadence as a [`Duration`]
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Failure backoff as a [`Duration`]
    #[must_use]
    pub fn failure_backoff(&self) -> Duration {
        Duration::from_secs(self.failure_backoff_secs)
    }

    /// Cache TTL as a [`Duration`]
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RefreshConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.attempt_timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30 * 60));
        assert_eq!(config.failure_backoff(), Duration::from_secs(2 * 60));
        assert_eq!(config.cache_key, "widgets/overview");
        assert_eq!(config.cache_ttl(), Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RefreshConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RefreshConfig::default());
    }

    #[test]
    fn test_deserialize_partial_override() {
        let config: RefreshConfig =
            serde_json::from_str(r#"{"max_retries": 0, "attempt_timeout_secs": 1}"#).unwrap();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.attempt_timeout(), Duration::from_secs(1));
        // Untouched fields keep their defaults
        assert_eq!(config.cache_key, "widgets/overview");
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = RefreshConfig {
            max_retries: 5,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: RefreshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
