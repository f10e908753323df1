//! Helmsman - operator console for a remote crypto trading engine.
//!
//! The engine runs elsewhere as an opaque, Basic-Auth-protected HTTP
//! service (freqtrade-compatible wire surface). This crate resolves
//! credentials, probes reachability, aggregates several endpoints into one
//! coherent status snapshot, issues start/stop and forced-trade commands,
//! and classifies failures for display.
//!
//! # Modules
//!
//! - [`engine`] - the control-plane client: credentials, transport,
//!   connection state machine, status aggregation, command dispatch, and
//!   failure classification
//! - [`app`] - configuration loading and logging setup
//! - [`cli`] - the operator-facing command surface
//! - [`error`] - error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use helmsman::app::config::EngineConfig;
//! use helmsman::engine::auth::{CredentialOverrides, Credentials};
//! use helmsman::engine::EngineClient;
//!
//! # async fn run() -> Result<(), helmsman::engine::classify::ClassifiedError> {
//! let credentials =
//!     Credentials::resolve(&EngineConfig::default(), &CredentialOverrides::default());
//! let client = EngineClient::new(credentials);
//! client.probe().await?;
//! if let Some(status) = client.status() {
//!     println!("engine is {}", status.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
