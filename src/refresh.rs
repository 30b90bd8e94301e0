//! Refresh orchestrator
//!
//! Coordinates one refresh cycle: credential gate, bounded sequential retry
//! with a per-attempt timeout, best-effort write-through to the result
//! cache, and cache fallback once the budget is exhausted. Every path
//! terminates in a [`RefreshOutcome`] value - callers never need a separate
//! error path for "the call itself failed".

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::cache::{now_millis, ResultCache};
use crate::config::RefreshConfig;
use crate::credentials::{check_credential, CredentialStore};
use crate::error::{FetchError, RefreshError};
use crate::fetch::MetricFetcher;
use crate::schedule::{next_refresh, RefreshSchedule};
use crate::types::{MetricSet, RefreshOutcome};

/// What the host gets back: the outcome plus the recommended next refresh
#[derive(Debug)]
pub struct RefreshReport {
    pub outcome: RefreshOutcome,
    pub next_refresh: RefreshSchedule,
}

/// Orchestrates refresh cycles over injected collaborators
///
/// Collaborators are passed in explicitly so a cycle is fully deterministic
/// under test: a scripted API, a fixed credential store, and an in-memory
/// cache reproduce every path.
#[derive(Clone)]
pub struct RefreshOrchestrator {
    credentials: Arc<dyn CredentialStore>,
    fetcher: MetricFetcher,
    cache: ResultCache,
    config: RefreshConfig,
}

impl RefreshOrchestrator {
    /// Create an orchestrator over the given collaborators
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        fetcher: MetricFetcher,
        cache: ResultCache,
        config: RefreshConfig,
    ) -> Self {
        Self {
            credentials,
            fetcher,
            cache,
            config,
        }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Run one refresh cycle with the configured retry budget
    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresh_with_budget(self.config.max_retries).await
    }

    /// Run one refresh cycle with an explicit retry budget
    ///
    /// `max_retries` is the number of extra attempts after the first
    /// failure, so the cycle performs at most `max_retries + 1` fetches.
    pub async fn refresh_with_budget(&self, max_retries: u32) -> RefreshOutcome {
        // Gate first: an unauthenticated attempt is guaranteed to fail and
        // would burn the host's execution-time budget for nothing. No cache
        // fallback here either - unauthorized is a distinct terminal state,
        // not evidence that cached numbers would help.
        let Some(token) = check_credential(self.credentials.as_ref()) else {
            info!("no valid credential, skipping fetch");
            return RefreshOutcome {
                timestamp_millis: now_millis(),
                metrics: MetricSet::empty(),
                error: Some(RefreshError::Unauthorized),
            };
        };

        // Bounded sequential retry. The credential is not re-checked per
        // attempt: it was valid moments ago and re-checking does not make a
        // transient network failure less likely.
        let attempt_budget = max_retries.saturating_add(1);
        let mut attempts_left = attempt_budget;

        let cause = loop {
            let attempt = attempt_budget - attempts_left + 1;
            let failure = match timeout(self.config.attempt_timeout(), self.fetcher.fetch(&token))
                .await
            {
                Ok(Ok(metrics)) => {
                    debug!(attempt, "fetch succeeded");
                    self.write_through(&metrics).await;
                    return RefreshOutcome {
                        timestamp_millis: now_millis(),
                        metrics,
                        error: None,
                    };
                }
                Ok(Err(e)) => {
                    warn!(attempt, attempts_total = attempt_budget, error = %e, "fetch attempt failed");
                    e
                }
                Err(_elapsed) => {
                    let budget = self.config.attempt_timeout();
                    warn!(attempt, attempts_total = attempt_budget, ?budget, "fetch attempt timed out");
                    FetchError::Timeout(budget)
                }
            };
            attempts_left -= 1;
            if attempts_left == 0 {
                break failure;
            }
        };

        // Budget exhausted: degrade to the last-known-good set if the cache
        // still has one.
        let now = now_millis();
        match self.cache.get(&self.config.cache_key, now).await {
            Some(metrics) => {
                info!("serving cached metrics after fetch failure");
                RefreshOutcome {
                    timestamp_millis: now,
                    metrics,
                    error: Some(RefreshError::Service(cause)),
                }
            }
            None => {
                warn!("no cached metrics available, returning empty set");
                RefreshOutcome {
                    timestamp_millis: now,
                    metrics: MetricSet::empty(),
                    error: Some(RefreshError::Service(cause)),
                }
            }
        }
    }

    /// The single entry point for hosts
    ///
    /// Runs a cycle and applies the schedule policy, yielding the one result
    /// shape the host's completion callback consumes.
    pub async fn perform_refresh(&self) -> RefreshReport {
        let outcome = self.refresh().await;
        let schedule = next_refresh(&outcome, now_millis(), &self.config);

        match &outcome.error {
            None => info!(next = ?schedule, "refresh complete with live metrics"),
            Some(e) if outcome.is_degraded() => {
                warn!(next = ?schedule, error = %e, "refresh degraded to cached metrics")
            }
            Some(e) => warn!(next = ?schedule, error = %e, "refresh failed with no metrics"),
        }

        RefreshReport {
            outcome,
            next_refresh: schedule,
        }
    }

    /// Best-effort write-through after a successful fetch
    ///
    /// Only a complete, successfully mapped set ever reaches this point, so
    /// a cancelled or timed-out attempt can never persist partial data.
    async fn write_through(&self, metrics: &MetricSet) {
        let expiry = now_millis().saturating_add(self.config.cache_ttl().as_millis() as u64);
        self.cache.put(&self.config.cache_key, metrics, expiry).await;
    }
}
