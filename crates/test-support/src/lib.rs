//! Shared helpers for integration tests: process management, port picking,
//! readiness polling, and an in-process mock of the signing backend.

use anyhow::Context as _;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::process::Child;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

pub struct KillOnDrop(pub Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
    }
}

/// Pick an unused TCP port on localhost.
///
/// Note: this does not reserve the port; it's still possible for another process to bind it
/// before you do.
///
/// # Errors
///
/// Returns an error if binding an ephemeral localhost port fails or if the bound socket's
/// local address cannot be read.
pub fn pick_unused_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("bind ephemeral port")?;
    Ok(listener.local_addr()?.port())
}

/// Poll an HTTP URL until it returns a success status (2xx/3xx).
///
/// # Errors
///
/// Returns an error if the timeout elapses before the endpoint returns a success status.
pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > timeout_dur {
            anyhow::bail!("timed out waiting for {url}");
        }

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(200)).await,
        }
    }
}

/// One request the mock backend received, as seen on the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Mutex<(StatusCode, Value)>>,
}

/// In-process stand-in for the signing REST API. Accepts POSTs on any
/// path, records them, and replies with the configured status and body.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Start the mock on an ephemeral localhost port. The default reply is
    /// `200 {"ok": true}` until [`MockBackend::respond_with`] changes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind.
    pub async fn start() -> anyhow::Result<Self> {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new((StatusCode::OK, json!({"ok": true})))),
        };

        let app = Router::new()
            .route("/{*path}", post(record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock backend")?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    /// Replace the canned reply for subsequent requests.
    pub fn respond_with(&self, status: StatusCode, body: Value) {
        if let Ok(mut guard) = self.state.response.lock() {
            *guard = (status, body);
        }
    }

    /// Snapshot of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    axum::Json(body): axum::Json<Value>,
) -> impl IntoResponse {
    let api_key = headers
        .get("x-api-key")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    if let Ok(mut guard) = state.requests.lock() {
        guard.push(RecordedRequest {
            path: uri.path().to_string(),
            api_key,
            body,
        });
    }

    let (status, reply) = state
        .response
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({})));
    (status, axum::Json(reply))
}
