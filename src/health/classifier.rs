//! UP/DOWN classification over a sample list.
//!
//! # Policy
//! ```text
//! no samples                       → DOWN
//! up_count / total * 100 >= 70.0   → UP
//! otherwise                        → DOWN
//! ```
//!
//! # Design Decisions
//! - Caller-supplied samples always win over a source URL; the source is
//!   only consulted when no samples were given at all
//! - Percentages are computed in `f64`, never integer division
//! - Threshold is inclusive

use serde::Serialize;
use thiserror::Error;

use crate::health::fetcher::{report_failure, FetchError, HttpFetcher, SampleSource};
use crate::health::sample::Sample;
use crate::health::status::Status;
use crate::observability::metrics;

/// Default share of up samples (in percent) required for `UP`.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 70.0;

#[derive(Debug, Error, PartialEq)]
#[error("threshold must be a finite percentage between 0 and 100, got {0}")]
pub struct InvalidThreshold(pub f64);

/// Inclusive up-percentage threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(percent: f64) -> Result<Self, InvalidThreshold> {
        if percent.is_finite() && (0.0..=100.0).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(InvalidThreshold(percent))
        }
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD_PERCENT)
    }
}

/// Where the samples for one classification come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyInput {
    /// Samples supplied directly by the caller.
    Samples(Vec<Sample>),
    /// URL to fetch samples from.
    Source(String),
}

impl ClassifyInput {
    /// Build an input from the optional pair, applying precedence.
    ///
    /// `data` wins whenever it is present, even when empty. Returns `None`
    /// when neither is given.
    pub fn from_parts(data: Option<Vec<Sample>>, api_url: Option<&str>) -> Option<Self> {
        match (data, api_url) {
            (Some(samples), _) => Some(ClassifyInput::Samples(samples)),
            (None, Some(url)) => Some(ClassifyInput::Source(url.to_string())),
            (None, None) => None,
        }
    }
}

/// Result of classifying a sample list, with the numbers behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub status: Status,
    pub up_count: usize,
    pub total_count: usize,
    /// `None` when there were no samples.
    pub up_percentage: Option<f64>,
}

/// Stateless classifier holding only its threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    threshold: Threshold,
}

impl Classifier {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Classify a sample list.
    pub fn classify(&self, samples: &[Sample]) -> Status {
        self.assess(samples).status
    }

    /// Classify a sample list and report the counts used.
    pub fn assess(&self, samples: &[Sample]) -> Assessment {
        let total_count = samples.len();
        if total_count == 0 {
            metrics::record_classification(Status::Down, None);
            return Assessment {
                status: Status::Down,
                up_count: 0,
                total_count: 0,
                up_percentage: None,
            };
        }

        let up_count = samples.iter().filter(|s| s.is_up()).count();
        let up_percentage = (up_count as f64 / total_count as f64) * 100.0;

        let status = if up_percentage >= self.threshold.percent() {
            Status::Up
        } else {
            Status::Down
        };

        tracing::debug!(
            up_count,
            total_count,
            up_percentage,
            status = %status,
            "Samples classified"
        );
        metrics::record_classification(status, Some(up_percentage));

        Assessment {
            status,
            up_count,
            total_count,
            up_percentage: Some(up_percentage),
        }
    }

    /// Turn an input into samples, fetching when needed.
    ///
    /// The fetch error is handed back alongside the (empty) samples so callers
    /// can tell "source failed" apart from "source had nothing".
    pub async fn resolve<S: SampleSource>(
        &self,
        source: &S,
        input: ClassifyInput,
    ) -> (Vec<Sample>, Option<FetchError>) {
        match input {
            ClassifyInput::Samples(samples) => (samples, None),
            ClassifyInput::Source(url) => match source.fetch(&url).await {
                Ok(samples) => (samples, None),
                Err(e) => {
                    report_failure(&e);
                    (Vec::new(), Some(e))
                }
            },
        }
    }

    /// `up_or_down` against an arbitrary sample source.
    pub async fn up_or_down_with<S: SampleSource>(
        &self,
        source: &S,
        data: Option<Vec<Sample>>,
        api_url: Option<&str>,
    ) -> Status {
        let samples = match ClassifyInput::from_parts(data, api_url) {
            Some(input) => self.resolve(source, input).await.0,
            None => Vec::new(),
        };
        self.classify(&samples)
    }
}

/// Classify `data`, or the samples at `api_url` when no data is given.
///
/// Uses the default 70% threshold and a default HTTP client.
pub async fn up_or_down(data: Option<Vec<Sample>>, api_url: Option<&str>) -> Status {
    Classifier::default()
        .up_or_down_with(&HttpFetcher::new(), data, api_url)
        .await
}
