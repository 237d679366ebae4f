//! Stand-in for the demo backend: replays queued responses and records
//! every request it receives.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("captured body is not JSON")
    }
}

/// Canned reply. An empty queue answers `200 {}`.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Duration,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self::raw(StatusCode::OK, "application/json", body)
    }

    /// Non-2xx reply carrying the backend's `{"error": ...}` body.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::raw(status_code(status), "application/json", &body)
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::raw(status_code(status), "text/plain", body)
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    fn raw(status: StatusCode, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).expect("invalid status code in test")
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<CapturedRequest>>,
    queue: Mutex<VecDeque<MockResponse>>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    recorder: Arc<Recorder>,
    stop: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let recorder = Arc::new(Recorder::default());
        let app = Router::new()
            .fallback(replay)
            .with_state(Arc::clone(&recorder));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await;
        });

        Self {
            addr,
            recorder,
            stop: Some(stop),
        }
    }

    pub async fn enqueue_response(&self, response: MockResponse) {
        self.recorder.queue.lock().push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.recorder.seen.lock().clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

async fn replay(
    State(recorder): State<Arc<Recorder>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    recorder.seen.lock().push(CapturedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        body: body.to_vec(),
    });

    let next = recorder.queue.lock().pop_front();
    let Some(reply) = next else {
        return (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], "{}").into_response();
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    (reply.status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}
