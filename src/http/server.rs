//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, CORS headers)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::MonitorConfig;
use crate::health::{Classifier, HttpFetcher, Threshold};
use crate::http::graphite::get_graphite_data;
use crate::http::status::{get_health, get_status};
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MonitorConfig>,
    /// Client for the Graphite helper.
    pub client: reqwest::Client,
    pub fetcher: HttpFetcher,
    pub classifier: Classifier,
}

/// HTTP server for the monitor.
pub struct MonitorServer {
    router: Router,
    config: Arc<MonitorConfig>,
}

impl MonitorServer {
    /// Create a new server with the given configuration.
    ///
    /// An out-of-range threshold falls back to the default; `load_config`
    /// rejects such files before they get here.
    pub fn new(config: MonitorConfig) -> Self {
        let threshold = Threshold::new(config.monitor.threshold_percent).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Using default threshold");
            Threshold::default()
        });

        let client = reqwest::Client::new();
        let config = Arc::new(config);

        let state = AppState {
            config: config.clone(),
            fetcher: HttpFetcher::with_client(client.clone()),
            client,
            classifier: Classifier::new(threshold),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MonitorConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/graphite", get(get_graphite_data))
            .route("/api/status", get(get_status))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, PUT, DELETE"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type, Authorization"),
            ))
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            source = ?self.config.monitor.api_url,
            threshold_percent = self.config.monitor.threshold_percent,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
