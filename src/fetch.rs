//! Metric fetcher: one remote attempt mapped into a complete metric set
//!
//! A single call performs a single request. The raw payload is mapped into
//! the six-entry [`MetricSet`]: revenue figures formatted as USD, counts
//! with thousands separators, absent fields as empty-string placeholders.
//! Retry and error classification live in the orchestrator.

use std::sync::Arc;

use crate::api::{OverviewApi, RawOverview};
use crate::credentials::CredentialToken;
use crate::error::FetchError;
use crate::formatting::{format_count, format_usd};
use crate::types::MetricSet;

/// Typed fetch layer over the raw API client
#[derive(Clone)]
pub struct MetricFetcher {
    api: Arc<dyn OverviewApi>,
}

impl MetricFetcher {
    /// Create a fetcher over the given API client
    #[must_use]
    pub fn new(api: Arc<dyn OverviewApi>) -> Self {
        Self { api }
    }

    /// Perform one fetch attempt and map the response
    ///
    /// Returns the complete metric set on success; a set is never partial.
    pub async fn fetch(&self, token: &CredentialToken) -> Result<MetricSet, FetchError> {
        let raw = self.api.request_overview(token).await?;
        Ok(map_overview(&raw))
    }
}

/// Map the raw overview payload into display-ready metrics
///
/// Field-by-field: a present value is formatted, an absent one becomes the
/// empty-string "unknown" placeholder.
#[must_use]
pub fn map_overview(raw: &RawOverview) -> MetricSet {
    MetricSet::from_values([
        raw.mrr.map(format_usd).unwrap_or_default(),
        raw.active_subscribers_count
            .map(format_count)
            .unwrap_or_default(),
        raw.active_trials_count.map(format_count).unwrap_or_default(),
        raw.revenue.map(format_usd).unwrap_or_default(),
        raw.active_users_count.map(format_count).unwrap_or_default(),
        raw.installs_count.map(format_count).unwrap_or_default(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricKind;

    #[test]
    fn test_map_full_payload() {
        let raw = RawOverview {
            mrr: Some(1234.5),
            active_subscribers_count: Some(1234),
            active_trials_count: Some(7),
            revenue: Some(99999.99),
            active_users_count: Some(900),
            installs_count: Some(1500),
        };
        let set = map_overview(&raw);
        assert_eq!(set.get(MetricKind::Mrr).value, "$1,234.50");
        assert_eq!(set.get(MetricKind::Subscriptions).value, "1,234");
        assert_eq!(set.get(MetricKind::Trials).value, "7");
        assert_eq!(set.get(MetricKind::Revenue).value, "$99,999.99");
        assert_eq!(set.get(MetricKind::Users).value, "900");
        assert_eq!(set.get(MetricKind::Installs).value, "1,500");
    }

    #[test]
    fn test_map_partial_payload_uses_placeholders() {
        let raw = RawOverview {
            mrr: Some(1000.0),
            active_subscribers_count: Some(50),
            ..Default::default()
        };
        let set = map_overview(&raw);
        let values: Vec<&str> = set.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["$1,000.00", "50", "", "", "", ""]);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_map_empty_payload_is_all_placeholders() {
        let set = map_overview(&RawOverview::default());
        assert!(set.is_empty());
        assert_eq!(set.records().len(), crate::types::METRIC_COUNT);
    }
}
