//! Constants used throughout the refresh pipeline
//!
//! Centralizes the timing and cache defaults so the values and their
//! rationale live in one place. All of these can be overridden via
//! [`crate::config::RefreshConfig`].

/// Retry and timing defaults
pub mod timing {
    /// Extra fetch attempts after the first failure (3 total attempts)
    ///
    /// Two retries absorb transient network blips without materially
    /// extending the host's execution-time budget.
    pub const MAX_RETRIES: u32 = 2;

    /// Per-attempt fetch timeout in seconds
    ///
    /// Bounds each attempt so one slow request cannot consume the whole
    /// retry budget's time allowance.
    pub const ATTEMPT_TIMEOUT_SECS: u64 = 5;

    /// Normal refresh cadence in seconds (30 minutes)
    ///
    /// Successful refreshes schedule on boundaries of this interval so
    /// independent callers cluster instead of drifting.
    pub const REFRESH_INTERVAL_SECS: u64 = 30 * 60;

    /// Backoff after a service failure in seconds (2 minutes)
    ///
    /// Short enough that transient outages recover quickly, long enough
    /// to avoid hammering the remote service.
    pub const FAILURE_BACKOFF_SECS: u64 = 2 * 60;
}

/// Result cache defaults
pub mod cache {
    /// Logical key for the one overview data surface
    pub const KEY: &str = "widgets/overview";

    /// Cache entry lifetime in seconds (24 hours)
    ///
    /// Numbers older than a day are worse than an explicit empty state.
    pub const TTL_SECS: u64 = 24 * 60 * 60;
}
