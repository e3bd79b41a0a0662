//! Best-effort forwarding of completed payments to a downstream ingest endpoint.
//!
//! The forward is awaited so its outcome can be reported back to the caller,
//! but it never changes the outcome of the payment completion itself.

use serde::Serialize;
use std::time::Duration;

use crate::metrics::INGEST_FORWARDS;

/// Header carrying the optional shared secret.
pub const INGEST_TOKEN_HEADER: &str = "x-ingest-token";

/// Upper bound on a single forward attempt.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct IngestTarget {
    pub url: String,
    pub token: Option<String>,
}

impl std::fmt::Debug for IngestTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestTarget")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent<'a> {
    pub payment_id: &'a str,
    pub txid: &'a str,
}

/// Advisory result of a forward attempt.
///
/// `status` is set when the destination answered (whatever the code);
/// `error` is set when it could not be reached at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestOutcome {
    pub fn delivered(status: u16, ok: bool) -> Self {
        Self {
            ok,
            status: Some(status),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            status: None,
            error: Some(error.into()),
        }
    }
}

/// Warn at startup when the ingest URL would carry payloads in cleartext.
pub fn validate_ingest_url(url: &str) {
    if !url.starts_with("https://") {
        tracing::warn!(
            url = %url,
            "RELAY_INGEST_URL does not use HTTPS; completed payments will be forwarded in cleartext"
        );
    }
}

/// POST `{paymentId, txid}` to the ingest target and capture the outcome.
pub async fn forward_completion(
    client: &reqwest::Client,
    target: &IngestTarget,
    payment_id: &str,
    txid: &str,
) -> IngestOutcome {
    let event = CompletionEvent { payment_id, txid };

    let mut req = client
        .post(&target.url)
        .timeout(FORWARD_TIMEOUT)
        .json(&event);

    if let Some(ref token) = target.token {
        req = req.header(INGEST_TOKEN_HEADER, token.as_str());
    }

    match req.send().await {
        Ok(resp) => {
            let status = resp.status();
            if status.is_success() {
                tracing::debug!(payment_id = %payment_id, status = %status, "completion forwarded");
                INGEST_FORWARDS.with_label_values(&["delivered"]).inc();
            } else {
                tracing::warn!(payment_id = %payment_id, status = %status, "ingest rejected completion");
                INGEST_FORWARDS.with_label_values(&["rejected"]).inc();
            }
            IngestOutcome::delivered(status.as_u16(), status.is_success())
        }
        Err(e) => {
            tracing::warn!(payment_id = %payment_id, error = %e, "completion forward failed");
            INGEST_FORWARDS.with_label_values(&["failed"]).inc();
            IngestOutcome::failed(e.to_string())
        }
    }
}
