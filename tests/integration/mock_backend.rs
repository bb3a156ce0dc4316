use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct BackendState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Responder,
}

/// In-process stand-in for the generation backend.
pub struct MockBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new()
            .route("/api/generate", post(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn handle(
    State(state): State<BackendState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(Recorded {
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: payload.clone(),
    });
    (state.responder)(&payload)
}

/// `Some(n)` for fan-out calls ("Variation #n."), `None` for the primary call.
pub fn variation_number(payload: &Value) -> Option<usize> {
    let prompt = payload.get("prompt")?.as_str()?;
    let (_, tail) = prompt.rsplit_once("Variation #")?;
    tail.trim_end_matches('.').parse().ok()
}

pub fn ok(body: Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}
