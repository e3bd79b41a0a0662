use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use pi_relay::RelayError;
use serde_json::{json, Value};

use crate::validation::FieldErrors;

/// Every way a `/api/pi/*` request can fail, resolved into a JSON response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body failed validation; the Pi API was never called.
    #[error("invalid request body: {0}")]
    Validation(FieldErrors),

    /// The Pi API rejected the call or could not be reached.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Relay(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({
                "ok": false,
                "error": errors,
            }),
            ApiError::Relay(e) => json!({
                "ok": false,
                "error": e.to_string(),
                "details": e.details().cloned().unwrap_or(Value::Null),
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
