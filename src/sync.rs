//! Upstream sync client
//!
//! Fetches the WHOOP-like and screen-time payloads from their two endpoints
//! concurrently, forwarding an opaque bearer token when one is configured,
//! then runs the result through the scoring pipeline. Failures surface as
//! upstream errors and are never retried.

use serde::de::DeserializeOwned;
use tracing::info;

use crate::adapters::{self, ScreenTimePayload, WhoopPayload};
use crate::error::ScoreError;
use crate::pipeline::compute_score;
use crate::types::{ScoreBreakdown, Variant};

#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl SyncClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    /// Fetch both upstream payloads concurrently.
    pub async fn fetch_today(
        &self,
        whoop_url: &str,
        screen_url: &str,
    ) -> Result<(WhoopPayload, ScreenTimePayload), ScoreError> {
        let (whoop, screen) = tokio::try_join!(
            self.fetch_json::<WhoopPayload>(whoop_url),
            self.fetch_json::<ScreenTimePayload>(screen_url),
        )?;
        info!("synced metrics from both endpoints");
        Ok((whoop, screen))
    }

    /// Fetch both payloads and score the day.
    pub async fn sync_and_score(
        &self,
        whoop_url: &str,
        screen_url: &str,
        variant: Variant,
    ) -> Result<ScoreBreakdown, ScoreError> {
        let (whoop, screen) = self.fetch_today(whoop_url, screen_url).await?;
        let fields = adapters::to_raw_fields(&whoop, &screen);
        compute_score(&fields, variant).map_err(reinterpret_as_upstream)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ScoreError> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| ScoreError::UpstreamFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ScoreError::UpstreamData(e.to_string()))
    }
}

/// Validation failures on synced values are upstream data problems, not
/// caller mistakes; re-tag them so the surfaced message says so.
fn reinterpret_as_upstream(err: ScoreError) -> ScoreError {
    match err {
        ScoreError::InvalidNumber { field } => {
            ScoreError::UpstreamData(format!("synced {field} was not a valid number"))
        }
        other => other,
    }
}
