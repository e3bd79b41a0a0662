//! Freedome payments backend.
//!
//! Relays Pi Network payment approval/completion and identity checks from a
//! client app to the Pi platform API, and optionally forwards completed
//! payments to an ingest endpoint.
//!
//! # Modules
//!
//! - [`config`]: environment configuration ([`BackendConfig`])
//! - [`routes`]: HTTP handlers for `/healthz`, `/metrics` and `/api/pi/*`
//! - [`ingest`]: best-effort forwarding of completed payments
//! - [`validation`]: request body validation with field-level errors

pub mod config;
pub mod cors;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod rate_limit;
pub mod routes;
pub mod security;
pub mod state;
pub mod validation;

pub use config::BackendConfig;
pub use error::ApiError;
pub use state::AppState;

/// Service name reported by `/healthz`.
pub const SERVICE_NAME: &str = "freedome-payments-backend";
