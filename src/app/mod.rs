//! Application configuration and logging setup.

pub mod config;
pub mod logging;

pub use config::{Config, EngineConfig};
pub use logging::LoggingConfig;
