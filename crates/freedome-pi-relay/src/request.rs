use reqwest::Method;
use serde_json::Value;

use crate::constants::{BEARER_SCHEME, KEY_SCHEME};

/// Credential attached to a relay call.
///
/// A call carries at most one credential: the service's own API key for
/// payment operations, or a user's bearer token for identity lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PiAuth<'a> {
    #[default]
    None,
    Key(&'a str),
    Bearer(&'a str),
}

impl PiAuth<'_> {
    /// Value for the `Authorization` header. Empty credentials send no header.
    pub fn header_value(&self) -> Option<String> {
        match *self {
            PiAuth::Key(key) if !key.is_empty() => Some(format!("{KEY_SCHEME} {key}")),
            PiAuth::Bearer(token) if !token.is_empty() => {
                Some(format!("{BEARER_SCHEME} {token}"))
            }
            _ => None,
        }
    }
}

/// Descriptor of one outbound call, relative to a [`PiClient`](crate::PiClient) base URL.
#[derive(Debug, Clone)]
pub struct PiRequest<'a> {
    /// Appended verbatim to the client's base URL.
    pub path: String,
    pub method: Method,
    pub auth: PiAuth<'a>,
    pub json_body: Option<Value>,
}

impl<'a> PiRequest<'a> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            auth: PiAuth::None,
            json_body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn auth(mut self, auth: PiAuth<'a>) -> Self {
        self.auth = auth;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }
}

/// Path of a payment action, e.g. `/payments/{id}/approve`, with the id
/// percent-encoded so it stays a single path segment.
pub fn payment_path(payment_id: &str, action: &str) -> String {
    format!("/payments/{}/{}", urlencoding::encode(payment_id), action)
}
