//! Schedule policy: when to attempt the next refresh
//!
//! A pure function of the outcome kind and the current instant, consuming
//! the error variants exhaustively so a new failure kind cannot silently
//! fall through to some default cadence.

use crate::config::RefreshConfig;
use crate::error::RefreshError;
use crate::types::RefreshOutcome;

/// Recommended next refresh instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSchedule {
    /// No automatic refresh: wait for an external event (re-authentication)
    Never,
    /// Refresh at the given instant (milliseconds since Unix epoch)
    At(u64),
}

impl RefreshSchedule {
    /// The scheduled instant, if any
    #[must_use]
    pub const fn instant_millis(&self) -> Option<u64> {
        match self {
            Self::Never => None,
            Self::At(millis) => Some(*millis),
        }
    }
}

/// Map a refresh outcome to the next refresh instant
///
/// - `Unauthorized`: never - blind retries against a known-invalid
///   credential are wasted work in a rate-limited, battery-constrained host.
/// - `Service`: short backoff so transient outages recover quickly without
///   hammering the remote service.
/// - success: the next boundary of the normal cadence rather than an offset
///   from "now", so refreshes across independent callers cluster instead of
///   drifting.
#[must_use]
pub fn next_refresh(
    outcome: &RefreshOutcome,
    now_millis: u64,
    config: &RefreshConfig,
) -> RefreshSchedule {
    match &outcome.error {
        Some(RefreshError::Unauthorized) => RefreshSchedule::Never,
        Some(RefreshError::Service(_)) => {
            RefreshSchedule::At(now_millis.saturating_add(config.failure_backoff().as_millis() as u64))
        }
        None => RefreshSchedule::At(next_boundary(
            now_millis,
            config.refresh_interval().as_millis() as u64,
        )),
    }
}

/// Next multiple of `interval_millis` strictly after `now_millis`
///
/// Strictly after: a refresh completing exactly on a boundary schedules the
/// following one, not itself.
#[must_use]
pub fn next_boundary(now_millis: u64, interval_millis: u64) -> u64 {
    if interval_millis == 0 {
        return now_millis;
    }
    ((now_millis / interval_millis) + 1).saturating_mul(interval_millis)
}
