//! Datapoint retrieval from a monitoring API.
//!
//! # Responsibilities
//! - Issue one GET against the source URL
//! - Treat 4xx/5xx as failure
//! - Extract the `datapoints` array from the JSON body
//!
//! # Design Decisions
//! - `SampleSource::fetch` reports a typed error; `fetch_data_from_api`
//!   collapses it into an empty list plus an error event
//! - A missing or null `datapoints` key is "no data", not an error
//! - No retries, no timeout beyond the client's defaults

use std::future::Future;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::health::sample::Sample;
use crate::observability::metrics;

/// Errors that can occur while fetching samples.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failed, timed out, or the request could not be built.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a client or server error.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON shape.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Body { .. } => "body",
            FetchError::Decode { .. } => "decode",
        }
    }
}

/// Anything that can produce a sample list for a URL.
pub trait SampleSource {
    fn fetch(&self, api_url: &str) -> impl Future<Output = Result<Vec<Sample>, FetchError>> + Send;
}

#[derive(Deserialize)]
struct DatapointsBody {
    #[serde(default)]
    datapoints: Option<Vec<Sample>>,
}

/// Parse an API body of the form `{"datapoints": [[0, ts], ...]}`.
pub fn parse_datapoints(body: &[u8]) -> Result<Vec<Sample>, serde_json::Error> {
    let parsed: DatapointsBody = serde_json::from_slice(body)?;
    Ok(parsed.datapoints.unwrap_or_default())
}

/// reqwest-backed sample source.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch samples, logging and swallowing any failure.
    pub async fn fetch_or_empty(&self, api_url: &str) -> Vec<Sample> {
        match self.fetch(api_url).await {
            Ok(samples) => samples,
            Err(e) => {
                report_failure(&e);
                Vec::new()
            }
        }
    }
}

impl SampleSource for HttpFetcher {
    async fn fetch(&self, api_url: &str) -> Result<Vec<Sample>, FetchError> {
        tracing::debug!(url = %api_url, "Fetching datapoints");

        let response = self
            .client
            .get(api_url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: api_url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                url: api_url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Body {
            url: api_url.to_string(),
            source,
        })?;

        let samples = parse_datapoints(&body).map_err(|source| FetchError::Decode {
            url: api_url.to_string(),
            source,
        })?;

        tracing::debug!(url = %api_url, count = samples.len(), "Datapoints fetched");
        Ok(samples)
    }
}

/// Emit the diagnostic for a failed fetch.
pub fn report_failure(error: &FetchError) {
    tracing::error!(kind = error.kind(), error = %error, "Error fetching data from API");
    metrics::record_fetch_failure(error.kind());
}

/// Fetch samples from `api_url` with a default client.
///
/// Never fails: errors are logged and an empty list is returned.
pub async fn fetch_data_from_api(api_url: &str) -> Vec<Sample> {
    HttpFetcher::new().fetch_or_empty(api_url).await
}
