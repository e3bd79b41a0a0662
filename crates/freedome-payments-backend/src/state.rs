use crate::config::BackendConfig;
use pi_relay::PiClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BackendConfig>,
    /// Client for the ingest forward; also backs [`AppState::pi`]
    pub http_client: reqwest::Client,
    pub pi: PiClient,
}

impl AppState {
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        let pi = PiClient::new(http_client.clone(), config.pi_api_base.clone());

        Ok(Self {
            config: Arc::new(config),
            http_client,
            pi,
        })
    }
}
