//! Shared test utilities for the integration suites.
//!
//! - `live_client()`: the one client for the configured search service;
//!   panics with the configuration error when the environment names none
//! - `StubSolr`: an in-process axum server answering with canned bodies, for
//!   exercising the client without a live service
//!
//! Import via `#[path = "../common/mod.rs"] mod common;`.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex, Once};
use std::thread;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use once_cell::sync::Lazy;
use serde_json::json;
use solr_relevance::{ConnectionProfile, HarnessConfig, Result, SolrClient};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

static LIVE: Lazy<Result<SolrClient>> = Lazy::new(|| {
    init_tracing();
    HarnessConfig::from_env().and_then(|config| SolrClient::new(&config))
});

/// Client for the configured service, shared by every test in the binary
///
/// Panics when no service is configured: the live suite is `#[ignore]`d, so
/// reaching this without `SOLR_URL` (or `SOLR_BASE_URL` + `SOLR_CORE`) is a
/// setup mistake.
pub fn live_client() -> &'static SolrClient {
    match LIVE.as_ref() {
        Ok(client) => client,
        Err(e) => panic!(
            "live relevance tests need a search service (set SOLR_URL, or SOLR_BASE_URL and SOLR_CORE): {}",
            e
        ),
    }
}

// ============================================================================
// StubSolr - canned HTTP responses
// ============================================================================

/// One request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Path without query string
    pub path: String,
    /// Decoded query parameters in wire order
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    /// First value of `key`
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of times `key` was sent
    pub fn count(&self, key: &str) -> usize {
        self.params.iter().filter(|(k, _)| k == key).count()
    }
}

/// Canned reply
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(body: serde_json::Value) -> Self {
        Reply {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, content_type: &'static str, body: &str) -> Self {
        Reply {
            status,
            content_type,
            body: body.to_string(),
        }
    }
}

/// Search-service body with the given ids and total
pub fn solr_body(ids: &[&str], num_found: u64) -> serde_json::Value {
    let docs: Vec<serde_json::Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    json!({
        "responseHeader": { "status": 0, "QTime": 3 },
        "response": { "numFound": num_found, "start": 0, "docs": docs }
    })
}

/// Ranked result set paged like the service: the first `rows` ids (10 when
/// `rows` is unset), with `numFound` covering all of them
pub fn paged_body(ids: &[&str], request: &RecordedRequest) -> serde_json::Value {
    let rows = request
        .param("rows")
        .and_then(|r| r.parse::<usize>().ok())
        .unwrap_or(10);
    solr_body(&ids[..rows.min(ids.len())], ids.len() as u64)
}

type Route = dyn Fn(&RecordedRequest) -> Reply + Send + Sync;

#[derive(Clone)]
struct StubState {
    route: Arc<Route>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process HTTP server on 127.0.0.1 that answers every request via `route`
pub struct StubSolr {
    /// Service URL, e.g. `http://127.0.0.1:41234/solr/catalog`
    pub url: String,
    /// `http://127.0.0.1:<port>`
    pub origin: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubSolr {
    pub fn start(route: impl Fn(&RecordedRequest) -> Reply + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            route: Arc::new(route),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(answer).with_state(state);

        // Bound before returning, so requests queue until the server loop runs
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind to ephemeral port");
        listener
            .set_nonblocking(true)
            .expect("non-blocking listener");
        let addr = listener.local_addr().expect("get local addr");

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("server run");
            });
        });

        let origin = format!("http://{}", addr);
        StubSolr {
            url: format!("{}/solr/catalog", origin),
            origin,
            requests,
        }
    }

    /// Client against this stub, single-URL profile, `select` handler
    pub fn client(&self) -> SolrClient {
        init_tracing();
        SolrClient::with_profile(&ConnectionProfile::Url(self.url.clone()), "select")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("stub received no requests")
    }
}

async fn answer(
    State(state): State<StubState>,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let request = RecordedRequest {
        path: uri.path().to_string(),
        params,
    };
    state.requests.lock().unwrap().push(request.clone());

    let reply = (state.route)(&request);
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}

/// Address nothing listens on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{}/solr/catalog", addr)
}
