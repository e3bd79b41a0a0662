//! Optional per-IP inbound rate limiting, off unless `RATE_LIMIT_RPM` is set.

use actix_governor::governor::middleware::NoOpMiddleware;
use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::middleware::Condition;

pub type PeerLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Build the shared limiter state, or `None` when limiting is disabled.
///
/// Build once and share across workers; each call starts a fresh quota.
pub fn peer_limit(rate_limit_rpm: Option<u32>) -> Option<PeerLimit> {
    rate_limit_rpm.and_then(|rpm| {
        GovernorConfigBuilder::default()
            .requests_per_minute(u64::from(rpm))
            .finish()
    })
}

/// Middleware that enforces `limit` when present and passes through otherwise.
pub fn rate_limiter(
    limit: Option<&PeerLimit>,
) -> Condition<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    match limit {
        Some(conf) => Condition::new(true, Governor::new(conf)),
        None => Condition::new(false, Governor::new(&GovernorConfig::default())),
    }
}
