//! Service health classification.
//!
//! # Data Flow
//! ```text
//! caller
//!     → classifier.rs (samples given? classify directly)
//!     → fetcher.rs (otherwise GET the source URL, extract "datapoints")
//!     → classifier.rs (up percentage vs threshold)
//!     → Status::Up | Status::Down
//! ```
//!
//! # Design Decisions
//! - Every failure degrades to "no data", and no data is `DOWN`
//! - Fetch errors are typed; only the adapter swallows them
//! - Calls share no state

pub mod classifier;
pub mod fetcher;
pub mod sample;
pub mod status;

pub use classifier::{up_or_down, Assessment, Classifier, ClassifyInput, Threshold};
pub use fetcher::{fetch_data_from_api, parse_datapoints, FetchError, HttpFetcher, SampleSource};
pub use sample::{Sample, SampleError};
pub use status::Status;
