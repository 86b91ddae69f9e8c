//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{body::Bytes, http::StatusCode, Router};
use tokio::net::TcpListener;

use updown_monitor::config::MonitorConfig;
use updown_monitor::{MonitorServer, Shutdown};

/// A running mock backend and the number of requests it has served.
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock backend that answers every request with a fixed response.
pub async fn start_mock_backend(status: u16, body: impl Into<String>) -> MockBackend {
    let body = body.into();
    start_programmable_backend(move |_| {
        let body = body.clone();
        async move { (status, body) }
    })
    .await
}

/// Start a mock backend whose response is computed from the request body.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(Bytes) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let f = Arc::new(f);
    let counter = hits.clone();
    let app = Router::new().fallback(move |body: Bytes| {
        let f = f.clone();
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            let (status, body) = f(body).await;
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, hits }
}

/// Datapoints body with `up` up samples followed by `down` down samples.
pub fn datapoints_body(up: usize, down: usize) -> String {
    let points: Vec<serde_json::Value> = std::iter::repeat(serde_json::json!([0, 1234567890]))
        .take(up)
        .chain(std::iter::repeat(serde_json::json!([1, 1234567890])).take(down))
        .collect();
    serde_json::json!({ "datapoints": points }).to_string()
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the monitor server on an ephemeral port.
pub async fn start_server(config: MonitorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = MonitorServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
