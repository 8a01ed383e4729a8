#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Value,
}

struct ServerState {
    status: StatusCode,
    reply: String,
    delay: Duration,
    captured: Mutex<Vec<Captured>>,
}

/// Local TRP endpoint that records every request and answers with a canned reply.
pub struct MockServer {
    pub endpoint: String,
    state: Arc<ServerState>,
}

impl MockServer {
    pub async fn start(status: StatusCode, reply: impl Into<String>) -> Self {
        Self::start_with_delay(status, reply, Duration::ZERO).await
    }

    pub async fn start_with_delay(
        status: StatusCode,
        reply: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let state = Arc::new(ServerState {
            status,
            reply: reply.into(),
            delay,
            captured: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}/"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.captured.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Captured {
        self.requests().pop().expect("no request captured")
    }
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.captured.lock().unwrap().push(Captured { headers, body });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.clone(),
    )
}

pub fn rpc_result(result: Value) -> String {
    json!({ "jsonrpc": "2.0", "result": result, "id": "1" }).to_string()
}

pub fn rpc_error(code: i64, message: &str, data: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message, "data": data },
        "id": "1",
    })
    .to_string()
}
