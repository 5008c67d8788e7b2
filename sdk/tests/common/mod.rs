//! In-process mock of the Affise API.
//!
//! Every request is recorded and answered from a table of canned
//! responses keyed by method and path. Unknown routes answer 404 with an
//! error envelope.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use affise_sdk::{AffiseClient, ClientConfig};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(Method, String), Canned>,
    requests: Vec<Recorded>,
}

/// Handle on a running mock server.
#[derive(Clone)]
pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Mutex<Shared>>,
}

impl MockServer {
    /// Starts a server on a random local port.
    pub async fn start() -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&shared));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self { addr, shared }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client with both audiences pointing at this server.
    pub fn client(&self) -> AffiseClient {
        let config = ClientConfig::new("test-key")
            .with_base_url(self.url())
            .with_admin_url(self.url());
        AffiseClient::new(config).expect("client")
    }

    /// Answers `method path` with a JSON body.
    pub fn on_json(&self, method: Method, path: &str, status: StatusCode, body: impl Into<String>) {
        self.on(method, path, status, "application/json", body);
    }

    /// Answers `method path` with an arbitrary body.
    pub fn on(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        content_type: &'static str,
        body: impl Into<String>,
    ) {
        let canned = Canned {
            status,
            content_type,
            body: body.into(),
            delay: None,
        };
        self.lock().routes.insert((method, path.to_string()), canned);
    }

    /// Answers `method path` with a JSON body after sleeping for `delay`.
    pub fn on_delayed(&self, method: Method, path: &str, delay: Duration, body: impl Into<String>) {
        let canned = Canned {
            status: StatusCode::OK,
            content_type: "application/json",
            body: body.into(),
            delay: Some(delay),
        };
        self.lock().routes.insert((method, path.to_string()), canned);
    }

    /// Answers `method path` with a fixture file from `tests/fixtures`.
    pub fn on_fixture(&self, method: Method, path: &str, name: &str) {
        self.on_json(method, path, StatusCode::OK, fixture(name));
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    /// The single request received so far.
    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got {requests:?}");
        requests.into_iter().next().expect("request")
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().expect("mock state")
    }
}

async fn handle(
    State(shared): State<Arc<Mutex<Shared>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let canned = {
        let mut shared = shared.lock().expect("mock state");
        shared.requests.push(Recorded {
            method: method.clone(),
            path: path.clone(),
            query: uri.query().map(str::to_string),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
        shared.routes.get(&(method, path)).cloned()
    };

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (
                canned.status,
                [(header::CONTENT_TYPE, canned.content_type)],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"status":2,"error":"Not found"}"#,
        )
            .into_response(),
    }
}

/// Reads `tests/fixtures/<name>`.
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {path}: {e}"))
}

/// Decodes a form or query string into sorted pairs.
pub fn pairs(encoded: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(encoded).expect("form encoded");
    pairs.sort();
    pairs
}
