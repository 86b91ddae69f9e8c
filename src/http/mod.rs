//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! client
//!     → server.rs (request ID, trace, timeout, CORS headers)
//!     → graphite.rs  GET /api/graphite  → Graphite helper (POST)
//!     → status.rs    GET /api/status    → health::Classifier
//!                    GET /health
//! ```

pub mod graphite;
pub mod server;
pub mod status;

pub use server::{AppState, MonitorServer};
