use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::constants::JSON_MEDIA_TYPE;
use crate::error::RelayError;
use crate::request::PiRequest;

/// Client for the Pi platform API rooted at a fixed base URL.
///
/// Wraps a shared `reqwest::Client`; cloning is cheap. Transport defaults
/// (timeouts, redirects) are whatever the wrapped client was built with.
#[derive(Debug, Clone)]
pub struct PiClient {
    http: reqwest::Client,
    base: String,
}

impl PiClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Issue exactly one request and normalize its outcome.
    ///
    /// Returns the parsed JSON body on a 2xx status (`Value::Null` for an
    /// empty body). Any other status is a [`RelayError::Upstream`], even when
    /// the body parsed cleanly.
    pub async fn send(&self, req: PiRequest<'_>) -> Result<Value, RelayError> {
        let url = format!("{}{}", self.base, req.path);

        let mut builder = self
            .http
            .request(req.method.clone(), &url)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        if let Some(auth) = req.auth.header_value() {
            builder = builder.header(AUTHORIZATION, auth);
        }

        if let Some(ref body) = req.json_body {
            builder = builder
                .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
                .body(body.to_string());
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(method = %req.method, path = %req.path, error = %e, "pi request failed");
            RelayError::Transport {
                message: e.to_string(),
            }
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::warn!(path = %req.path, error = %e, "failed to read pi response body");
            RelayError::Transport {
                message: e.to_string(),
            }
        })?;
        let data = normalize_body(&text);

        tracing::debug!(method = %req.method, path = %req.path, status = %status, "pi response");

        if !status.is_success() {
            let message = failure_message(&data, status.as_u16());
            tracing::warn!(path = %req.path, status = status.as_u16(), message = %message, "pi rejected request");
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                message,
                details: data,
            });
        }

        Ok(data)
    }
}

/// Parse a response body: empty is null, non-JSON text becomes `{"raw": text}`.
pub fn normalize_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

/// Pick a human-readable message for a failed call.
///
/// Looks at `error`, then `message`, then `raw`; the first field holding a
/// non-empty, non-false, non-zero value wins. Falls back to `HTTP <status>`.
pub fn failure_message(data: &Value, status: u16) -> String {
    ["error", "message", "raw"]
        .iter()
        .find_map(|field| data.get(field).and_then(message_text))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}
