use pi_relay::PiAuth;
use std::env;
use url::Url;

use crate::ingest::IngestTarget;

const DEFAULT_PORT: u16 = 8788;
const DEFAULT_CORS_ORIGIN: &str = "*";

#[derive(Clone)]
pub struct BackendConfig {
    /// Server port
    pub port: u16,
    /// Pi platform API base URL, e.g. `https://api.minepi.com/v2`
    pub pi_api_base: String,
    /// Server API key for approve/complete (None = those calls are unauthenticated)
    pub pi_server_api_key: Option<String>,
    /// CORS allowed origins (`*` allows any)
    pub allowed_origins: Vec<String>,
    /// Destination for completed-payment forwarding (None = disabled)
    pub ingest: Option<IngestTarget>,
    /// Requests per minute per client IP (None = no inbound limit)
    pub rate_limit_rpm: Option<u32>,
    /// Bearer token required for /metrics (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("port", &self.port)
            .field("pi_api_base", &self.pi_api_base)
            .field(
                "pi_server_api_key",
                &self.pi_server_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("allowed_origins", &self.allowed_origins)
            .field("ingest", &self.ingest)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());

        let port = var("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let pi_api_base =
            var("PI_API_BASE").unwrap_or_else(|| pi_relay::DEFAULT_PI_API_BASE.to_string());
        Url::parse(&pi_api_base).map_err(|_| ConfigError::InvalidUrl {
            var: "PI_API_BASE",
            value: pi_api_base.clone(),
        })?;

        let pi_server_api_key = var("PI_SERVER_API_KEY");

        let allowed_origins: Vec<String> = var("CORS_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let ingest = match var("RELAY_INGEST_URL") {
            Some(url) => {
                Url::parse(&url).map_err(|_| ConfigError::InvalidUrl {
                    var: "RELAY_INGEST_URL",
                    value: url.clone(),
                })?;
                Some(IngestTarget {
                    url,
                    token: var("RELAY_INGEST_TOKEN"),
                })
            }
            None => None,
        };

        let rate_limit_rpm = var("RATE_LIMIT_RPM")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|rpm| *rpm > 0);

        let metrics_token = var("METRICS_TOKEN");

        if pi_server_api_key.is_none() {
            tracing::warn!("PI_SERVER_API_KEY missing. approve/complete will fail until you set it.");
        }

        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set; /metrics endpoint is publicly accessible");
        }

        if let Some(ref target) = ingest {
            crate::ingest::validate_ingest_url(&target.url);
        }

        Ok(Self {
            port,
            pi_api_base,
            pi_server_api_key,
            allowed_origins,
            ingest,
            rate_limit_rpm,
            metrics_token,
        })
    }

    /// Credential for calls made on the service's own behalf.
    pub fn service_auth(&self) -> PiAuth<'_> {
        self.pi_server_api_key
            .as_deref()
            .map_or(PiAuth::None, PiAuth::Key)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },
}
