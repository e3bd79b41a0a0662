use actix_web::{web, HttpRequest, HttpResponse};

use crate::metrics::metrics_output;
use crate::security::bearer_matches;
use crate::state::AppState;
use crate::SERVICE_NAME;

/// GET /healthz - Liveness check
pub async fn healthz(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "service": SERVICE_NAME,
        "piApiBase": &state.config.pi_api_base,
    }))
}

/// GET /metrics - Prometheus metrics endpoint (optionally auth-gated)
pub async fn metrics(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(ref expected_token) = state.config.metrics_token {
        let header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        if !bearer_matches(header, expected_token) {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "unauthorized",
                "message": "Valid Bearer token required for /metrics"
            }));
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics_output())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(healthz))
        .route("/metrics", web::get().to(metrics));
}
