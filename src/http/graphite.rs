//! Graphite render proxy.
//!
//! `GET /api/graphite` POSTs the configured render path to the Graphite
//! helper and relays its JSON and status code back to the caller.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Body sent to the Graphite helper.
#[derive(Debug, Serialize)]
pub struct RenderRequest<'a> {
    pub path: &'a str,
    pub payload: &'a str,
}

fn error_response(message: &'static str) -> Response {
    metrics::record_graphite_request(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

pub async fn get_graphite_data(State(state): State<AppState>) -> Response {
    let graphite = &state.config.graphite;

    let body = match serde_json::to_vec(&RenderRequest {
        path: &graphite.path,
        payload: &graphite.payload,
    }) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode render request");
            return error_response("Failed to marshal JSON");
        }
    };

    let response = match state
        .client
        .post(&graphite.api_url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(url = %graphite.api_url, error = %e, "Graphite request failed");
            return error_response("Failed to make API request");
        }
    };

    let status = response.status();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(url = %graphite.api_url, error = %e, "Failed to read Graphite response");
            return error_response("Failed to read response body");
        }
    };

    let value: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(url = %graphite.api_url, status = %status, error = %e, "Graphite returned invalid JSON");
            return error_response("Failed to parse JSON response");
        }
    };

    tracing::debug!(status = %status, "Graphite response relayed");
    metrics::record_graphite_request(status.as_u16());
    (status, Json(value)).into_response()
}
