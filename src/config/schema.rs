//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::health::classifier::DEFAULT_THRESHOLD_PERCENT;

/// Root configuration for the monitor service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream Graphite helper proxied by `/api/graphite`.
    pub graphite: GraphiteConfig,

    /// Datapoint source and classification threshold for `/api/status`.
    pub monitor: ClassifierConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Graphite helper endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphiteConfig {
    /// URL the render request is POSTed to.
    pub api_url: String,

    /// Render path forwarded in the request body.
    pub path: String,

    /// Opaque payload forwarded in the request body.
    pub payload: String,
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://553f5731-6546-4660-bca9-42e8866c0cf9.mock.pstmn.io/v1/vpchelper/?host=vigilant-vino-iamr-02&action=GET&aws_region=us-east-2&service=graphite".to_string(),
            path: "/render/?target=virgil.gov-vigilant-nat-01.host.hostalive.perfdata.pl.value&format=json&from=-90d&to=-30d".to_string(),
            payload: String::new(),
        }
    }
}

/// Classification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// API returning `{"datapoints": [...]}`. Unset means always `DOWN`.
    pub api_url: Option<String>,

    /// Minimum share of up samples, in percent, for `UP` (inclusive).
    pub threshold_percent: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout for inbound HTTP requests in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
