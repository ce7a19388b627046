//! Client configuration persisted between runs.
//!
//! Holds the backend address, the preferred voice and the progress tick.
//! Command-line flags take precedence over the stored values.

mod store;

pub use store::{ClientConfig, ConfigError, ConfigStore};
