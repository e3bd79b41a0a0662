//! CORS configuration for the backend.

use actix_cors::Cors;

/// Build the CORS middleware from allowed origins.
///
/// A `*` entry allows any origin and answers with a wildcard
/// `Access-Control-Allow-Origin`; otherwise only exact matches are allowed.
/// Preflights echo back whatever request headers the browser asks for.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.iter().any(|a| a == "*") {
        Cors::default().allow_any_origin().send_wildcard()
    } else {
        let allowed = allowed_origins.to_vec();
        Cors::default().allowed_origin_fn(move |origin, _req_head| {
            let origin_str = origin.to_str().unwrap_or("");
            allowed.iter().any(|a| a == origin_str)
        })
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
