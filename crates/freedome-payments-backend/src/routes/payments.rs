use actix_web::{web, HttpResponse};
use pi_relay::{payment_path, PiRequest};
use serde_json::json;

use super::{call_pi, rejected};
use crate::error::ApiError;
use crate::ingest::forward_completion;
use crate::state::AppState;
use crate::validation::{BodyValidator, FieldErrors};

const MIN_ID_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct ApproveRequest {
    pub payment_id: String,
}

impl ApproveRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, FieldErrors> {
        let mut v = BodyValidator::parse(body)?;
        let payment_id = v.string_min("paymentId", MIN_ID_LEN);
        v.finish(payment_id.map(|payment_id| Self { payment_id }))
    }
}

#[derive(Debug, Clone)]
pub struct CompleteRequest {
    pub payment_id: String,
    pub txid: String,
}

impl CompleteRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, FieldErrors> {
        let mut v = BodyValidator::parse(body)?;
        let payment_id = v.string_min("paymentId", MIN_ID_LEN);
        let txid = v.string_min("txid", MIN_ID_LEN);
        v.finish(
            payment_id
                .zip(txid)
                .map(|(payment_id, txid)| Self { payment_id, txid }),
        )
    }
}

/// POST /api/pi/approve - Server-side approval of a payment
pub async fn approve(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let ApproveRequest { payment_id } =
        ApproveRequest::from_body(&body).map_err(|e| rejected("approve", e))?;

    let pi = call_pi(
        &state,
        "approve",
        PiRequest::post(payment_path(&payment_id, "approve"))
            .auth(state.config.service_auth())
            .json(json!({})),
    )
    .await?;

    tracing::info!(payment_id = %payment_id, "payment approved");

    Ok(HttpResponse::Ok().json(json!({
        "ok": true,
        "paymentId": payment_id,
        "pi": pi,
    })))
}

/// POST /api/pi/complete - Server-side completion, then optional ingest forward
pub async fn complete(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let CompleteRequest { payment_id, txid } =
        CompleteRequest::from_body(&body).map_err(|e| rejected("complete", e))?;

    let pi = call_pi(
        &state,
        "complete",
        PiRequest::post(payment_path(&payment_id, "complete"))
            .auth(state.config.service_auth())
            .json(json!({ "txid": txid })),
    )
    .await?;

    tracing::info!(payment_id = %payment_id, txid = %txid, "payment completed");

    // Only reached once the Pi API has accepted the completion.
    let relay = match state.config.ingest {
        Some(ref target) => {
            Some(forward_completion(&state.http_client, target, &payment_id, &txid).await)
        }
        None => None,
    };

    Ok(HttpResponse::Ok().json(json!({
        "ok": true,
        "paymentId": payment_id,
        "txid": txid,
        "pi": pi,
        "relay": relay,
    })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/pi/approve", web::post().to(approve))
        .route("/api/pi/complete", web::post().to(complete));
}
