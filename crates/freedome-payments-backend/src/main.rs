use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freedome_payments::{
    config::BackendConfig,
    metrics::register_metrics,
    rate_limit::{peer_limit, rate_limiter},
    routes,
    state::AppState,
};

/// Matches the JSON body limit the client app was built against.
const BODY_LIMIT_BYTES: usize = 256 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Pi API base: {}", config.pi_api_base);
    tracing::info!(
        "Completion forwarding: {}",
        match config.ingest {
            Some(ref target) => target.url.as_str(),
            None => "disabled",
        }
    );
    match rate_limit_rpm {
        Some(rpm) => tracing::info!("Rate limit: {rpm} req/min per IP"),
        None => tracing::info!("Rate limit: disabled"),
    }

    register_metrics();

    let state = AppState::new(config).map_err(std::io::Error::other)?;
    let state_data = web::Data::new(state);

    let limit = peer_limit(rate_limit_rpm);

    tracing::info!("Freedome Payments Backend listening on http://0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(BODY_LIMIT_BYTES))
            .wrap(Logger::default())
            .wrap(freedome_payments::cors::build_cors(&allowed_origins))
            .wrap(rate_limiter(limit.as_ref()))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
