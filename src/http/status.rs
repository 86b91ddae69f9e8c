//! Status and liveness handlers.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::health::{Assessment, ClassifyInput};
use crate::http::server::AppState;

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub assessment: Assessment,

    /// Why the source produced no samples, when it failed.
    pub source_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusReport> {
    let input = ClassifyInput::from_parts(None, state.config.monitor.api_url.as_deref());

    let (samples, error) = match input {
        Some(input) => state.classifier.resolve(&state.fetcher, input).await,
        None => {
            tracing::debug!("No datapoint source configured");
            (Vec::new(), None)
        }
    };

    let assessment = state.classifier.assess(&samples);
    tracing::info!(
        status = %assessment.status,
        up_count = assessment.up_count,
        total_count = assessment.total_count,
        "Status evaluated"
    );

    Json(StatusReport {
        assessment,
        source_error: error.map(|e| e.to_string()),
    })
}

pub async fn get_health() -> Json<Liveness> {
    Json(Liveness {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
