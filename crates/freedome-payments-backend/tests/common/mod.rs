//! In-process stand-ins for the Pi API and the ingest endpoint.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;

use freedome_payments::{AppState, BackendConfig};

/// One request as seen by a [`MockServer`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub ingest_token: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct Canned {
    status: u16,
    body: &'static str,
    calls: Mutex<Vec<Recorded>>,
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn record(req: HttpRequest, body: web::Bytes, canned: web::Data<Canned>) -> HttpResponse {
    canned.calls.lock().unwrap().push(Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        authorization: header(&req, "authorization"),
        ingest_token: header(&req, "x-ingest-token"),
        content_type: header(&req, "content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    HttpResponse::build(StatusCode::from_u16(canned.status).unwrap()).body(canned.body)
}

/// HTTP server answering every request with a fixed status and body.
pub struct MockServer {
    pub url: String,
    canned: web::Data<Canned>,
}

impl MockServer {
    /// Must be called from inside an actix system (e.g. `#[actix_rt::test]`).
    pub fn start(status: u16, body: &'static str) -> Self {
        let canned = web::Data::new(Canned {
            status,
            body,
            calls: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let data = canned.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(record))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        actix_rt::spawn(server);

        Self {
            url: format!("http://{addr}"),
            canned,
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.canned.calls.lock().unwrap().clone()
    }
}

/// Refuses connections: nothing listens on port 1.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

/// App state pointing at `pi_base`, with extra environment-style overrides.
pub fn app_state(pi_base: &str, vars: &[(&str, &str)]) -> web::Data<AppState> {
    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert("PI_API_BASE".to_string(), pi_base.to_string());

    let config = BackendConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
    web::Data::new(AppState::new(config).unwrap())
}
