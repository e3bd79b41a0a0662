use actix_web::{web, HttpResponse};
use pi_relay::{PiAuth, PiRequest};
use serde_json::json;

use super::{call_pi, rejected};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{BodyValidator, FieldErrors};

const MIN_TOKEN_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct VerifyMeRequest {
    pub access_token: String,
}

impl VerifyMeRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, FieldErrors> {
        let mut v = BodyValidator::parse(body)?;
        let access_token = v.string_min("accessToken", MIN_TOKEN_LEN);
        v.finish(access_token.map(|access_token| Self { access_token }))
    }
}

/// POST /api/pi/verify-me - Look up the user behind a Pi access token
///
/// Authenticates with the caller's token only; the server API key is never sent.
pub async fn verify_me(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let VerifyMeRequest { access_token } =
        VerifyMeRequest::from_body(&body).map_err(|e| rejected("verify_me", e))?;

    let me = call_pi(
        &state,
        "verify_me",
        PiRequest::get("/me").auth(PiAuth::Bearer(&access_token)),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "ok": true, "me": me })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/pi/verify-me", web::post().to(verify_me));
}
