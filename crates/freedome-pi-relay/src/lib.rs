//! Relay client for the Pi Network payments REST API.
//!
//! Every call is single-shot: one outbound HTTP request, no retries, and the
//! response normalized into either a parsed JSON payload or a [`RelayError`]
//! carrying the upstream status and diagnostic body.
//!
//! # Example
//!
//! ```no_run
//! use pi_relay::{PiAuth, PiClient, PiRequest};
//!
//! # async fn run() -> Result<(), pi_relay::RelayError> {
//! let client = PiClient::new(reqwest::Client::new(), pi_relay::DEFAULT_PI_API_BASE);
//! let me = client
//!     .send(PiRequest::get("/me").auth(PiAuth::Bearer("user-access-token")))
//!     .await?;
//! println!("{me}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod constants;
pub mod error;
pub mod request;

pub use client::{failure_message, normalize_body, PiClient};
pub use constants::*;
pub use error::RelayError;
pub use request::{payment_path, PiAuth, PiRequest};
pub use reqwest::Method;
