//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → shared via Arc with the HTTP handlers
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClassifierConfig;
pub use schema::GraphiteConfig;
pub use schema::ListenerConfig;
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::TimeoutConfig;
