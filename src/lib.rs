//! Background refresh pipeline for overview business metrics
//!
//! Supplies a fixed set of business metrics (MRR, subscriptions, trials,
//! revenue, users, installs) to a display surface that is refreshed on a
//! schedule it does not fully control, under intermittent authentication
//! validity and network unreliability.
//!
//! One refresh cycle:
//! 1. **Credential gate** - no fetch is attempted without a usable token
//!    ([`credentials`]).
//! 2. **Fetch with bounded retry** - sequential attempts, each under its own
//!    timeout ([`fetch`], [`refresh`]).
//! 3. **Write-through / fallback cache** - every success is cached; the
//!    cache is read only when the retry budget is exhausted ([`cache`]).
//! 4. **Schedule policy** - the outcome maps to the next refresh instant:
//!    success on the normal cadence boundary, service failure on a short
//!    backoff, unauthorized never ([`schedule`]).
//!
//! No error escapes [`RefreshOrchestrator::perform_refresh`]: every path
//! yields a [`RefreshReport`] whose outcome carries the best-available
//! metrics and, if degraded, the failure classification the surface needs
//! to signal staleness.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use overview_refresh::{
//!     init_logging, CredentialToken, FileBackend, HttpOverviewApi, MetricFetcher,
//!     RefreshConfig, RefreshOrchestrator, ResultCache, StaticCredentialStore,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let _log_guard = init_logging("/var/log/overview", "refresh.log")?;
//! let config = RefreshConfig::default();
//! let api = HttpOverviewApi::new("https://api.example.com", config.attempt_timeout())?;
//! let store = StaticCredentialStore::new(CredentialToken::new("sk_live_..."));
//! let cache = ResultCache::new(Arc::new(FileBackend::new("/var/cache/overview")));
//!
//! let orchestrator = RefreshOrchestrator::new(
//!     Arc::new(store),
//!     MetricFetcher::new(Arc::new(api)),
//!     cache,
//!     config,
//! );
//!
//! let report = orchestrator.perform_refresh().await;
//! for record in report.outcome.metrics.iter() {
//!     println!("{}: {}", record.kind, record.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod formatting;
pub mod logging;
pub mod refresh;
pub mod schedule;
pub mod types;

pub use api::{HttpOverviewApi, OverviewApi, RawOverview};
pub use cache::{now_millis, CacheBackend, FileBackend, MemoryBackend, ResultCache};
pub use config::RefreshConfig;
pub use credentials::{CredentialStore, CredentialToken, StaticCredentialStore};
pub use error::{FetchError, RefreshError};
pub use fetch::MetricFetcher;
pub use logging::init_logging;
pub use refresh::{RefreshOrchestrator, RefreshReport};
pub use schedule::{next_refresh, RefreshSchedule};
pub use types::{MetricKind, MetricRecord, MetricSet, RefreshOutcome, METRIC_COUNT};
