//! reqwest-backed overview API client
//!
//! Thin transport wrapper: builds the request, maps the response, and wraps
//! failures into [`FetchError`] without classifying them further.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::api::{OverviewApi, RawOverview};
use crate::credentials::CredentialToken;
use crate::error::FetchError;

/// Path of the overview endpoint relative to the API base URL
const OVERVIEW_PATH: &str = "/v1/developers/me/overview";

/// HTTP client for the overview endpoint
#[derive(Debug, Clone)]
pub struct HttpOverviewApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOverviewApi {
    /// Create a client against the given API base URL
    ///
    /// `request_timeout` bounds each HTTP request at the transport level,
    /// independently of the orchestrator's per-attempt budget.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn overview_url(&self) -> String {
        format!("{}{}", self.base_url, OVERVIEW_PATH)
    }
}

#[async_trait]
impl OverviewApi for HttpOverviewApi {
    async fn request_overview(&self, token: &CredentialToken) -> Result<RawOverview, FetchError> {
        let url = self.overview_url();
        debug!(%url, "requesting overview metrics");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        if !status.is_success() {
            // Includes 401 after the gate has passed: stays a service-level
            // status failure, never re-classified as unauthorized here.
            return Err(FetchError::Status(status.as_u16()));
        }

        // 204 carries no body to decode
        if status == StatusCode::NO_CONTENT {
            return Ok(RawOverview::default());
        }

        response
            .json::<RawOverview>()
            .await
            .map_err(FetchError::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_url_joins_base() {
        let api =
            HttpOverviewApi::new("https://api.example.com", Duration::from_secs(5)).unwrap();
        assert_eq!(
            api.overview_url(),
            "https://api.example.com/v1/developers/me/overview"
        );
    }

    #[test]
    fn test_overview_url_strips_trailing_slash() {
        let api =
            HttpOverviewApi::new("https://api.example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            api.overview_url(),
            "https://api.example.com/v1/developers/me/overview"
        );
    }
}
