//! UP/DOWN service monitor.
//!
//! Fetches monitoring datapoints from an HTTP API and classifies the service
//! as `UP` when at least 70% of the samples report up.
//!
//! ```no_run
//! # async fn demo() {
//! use updown_monitor::health::{up_or_down, Sample, Status};
//!
//! let samples = vec![Sample::up(), Sample::up(), Sample::down()];
//! assert_eq!(up_or_down(Some(samples), None).await, Status::Down);
//!
//! let live = up_or_down(None, Some("http://localhost:9000/datapoints")).await;
//! println!("{live}");
//! # }
//! ```

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::MonitorConfig;
pub use health::{fetch_data_from_api, up_or_down, Sample, Status};
pub use http::MonitorServer;
pub use lifecycle::Shutdown;
