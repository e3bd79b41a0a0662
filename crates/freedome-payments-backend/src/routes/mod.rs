pub mod health;
pub mod identity;
pub mod payments;

use actix_web::web;
use pi_relay::PiRequest;
use serde_json::Value;

use crate::error::ApiError;
use crate::metrics::{PI_LATENCY, PI_REQUESTS, VALIDATION_FAILURES};
use crate::state::AppState;
use crate::validation::FieldErrors;

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    payments::configure(cfg);
    identity::configure(cfg);
}

/// Send one request to the Pi API on behalf of `route`, recording metrics.
pub(crate) async fn call_pi(
    state: &AppState,
    route: &'static str,
    req: PiRequest<'_>,
) -> Result<Value, ApiError> {
    let timer = PI_LATENCY.with_label_values(&[route]).start_timer();
    let result = state.pi.send(req).await;
    timer.observe_duration();

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) if e.status().is_some() => "rejected",
        Err(_) => "unreachable",
    };
    PI_REQUESTS.with_label_values(&[route, outcome]).inc();

    result.map_err(ApiError::from)
}

pub(crate) fn rejected(route: &'static str, errors: FieldErrors) -> ApiError {
    tracing::debug!(route = route, errors = %errors, "request failed validation");
    VALIDATION_FAILURES.with_label_values(&[route]).inc();
    ApiError::Validation(errors)
}
