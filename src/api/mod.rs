//! Remote overview API contract
//!
//! The transport is an external collaborator behind [`OverviewApi`]; the
//! pipeline only depends on the trait and the raw response shape. A
//! reqwest-backed implementation lives in [`http`].

pub mod http;

pub use http::HttpOverviewApi;

use async_trait::async_trait;
use serde::Deserialize;

use crate::credentials::CredentialToken;
use crate::error::FetchError;

/// Raw overview payload as the remote service reports it
///
/// Every field is optional: a null or absent upstream field is not a fetch
/// error, only a missing downstream metric. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOverview {
    /// Monthly recurring revenue in USD
    pub mrr: Option<f64>,
    pub active_subscribers_count: Option<i64>,
    pub active_trials_count: Option<i64>,
    /// Total revenue in USD
    pub revenue: Option<f64>,
    pub active_users_count: Option<i64>,
    pub installs_count: Option<i64>,
}

/// Remote API client contract - one request, no retry, no classification
///
/// Retry is the orchestrator's responsibility; error classification into
/// unauthorized vs service failure happens at the orchestrator boundary.
#[async_trait]
pub trait OverviewApi: Send + Sync {
    /// Request the overview metrics with the given credential
    async fn request_overview(&self, token: &CredentialToken) -> Result<RawOverview, FetchError>;
}
