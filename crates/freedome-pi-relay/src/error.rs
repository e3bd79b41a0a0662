use serde_json::Value;
use thiserror::Error;

/// Failure of a single relay call.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The provider answered with a non-2xx status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        /// Parsed body, `{"raw": ...}` for non-JSON text, or null when empty.
        details: Value,
    },

    /// The request never produced a response (connect, DNS, body read).
    #[error("{message}")]
    Transport { message: String },
}

impl RelayError {
    /// Upstream HTTP status, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RelayError::Upstream { status, .. } => Some(*status),
            RelayError::Transport { .. } => None,
        }
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            RelayError::Upstream { details, .. } if !details.is_null() => Some(details),
            _ => None,
        }
    }
}
