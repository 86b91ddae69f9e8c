//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM
//!     → signals.rs
//!     → shutdown.rs (watch flag)
//!     → HTTP server stops accepting and drains
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
